//! Igniter конфигурация

use bevy::prelude::*;

use crate::error::{require_non_negative, require_positive, ConfigError};

/// Параметры поджога (immutable, принадлежит Igniter / AreaEffect)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct IgniteConfig {
    /// Урон в секунду (непрерывный, dps × delta каждый тик)
    pub damage_per_second: f32,
    /// Длительность горения (секунды)
    pub duration: f32,
    /// Effect id горения (looping)
    pub effect_id: String,
}

impl Default for IgniteConfig {
    fn default() -> Self {
        Self {
            damage_per_second: 5.0,
            duration: 10.0,
            effect_id: "ImbueFireRagdoll".to_string(),
        }
    }
}

impl IgniteConfig {
    /// Validated constructor (dps ≥ 0, duration > 0)
    pub fn new(
        damage_per_second: f32,
        duration: f32,
        effect_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            damage_per_second: require_non_negative("burn damage per second", damage_per_second)?,
            duration: require_positive("burn duration", duration)?,
            effect_id: effect_id.into(),
        })
    }

    /// Полный урон за всё горение
    pub fn total_damage(&self) -> f32 {
        self.damage_per_second * self.duration
    }
}

/// Igniter — поджигает персонажа при прямом контакте предмета
///
/// Без distance/exemption проверок: любое касание поджигает.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Igniter {
    pub config: IgniteConfig,
}
