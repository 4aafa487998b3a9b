//! Blast конфигурация + exemption policy

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::burn::IgniteConfig;
use crate::error::{require_non_negative, require_positive, ConfigError};

/// Радиус, при котором auto-scale эффекта = 1.0
pub const EFFECT_REFERENCE_RADIUS: f32 = 10.0;

/// Параметры взрыва (immutable, принадлежит AreaEffect)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct BlastConfig {
    /// Радиус поражения (метры, > 0)
    pub radius: f32,
    /// Сила radial impulse (velocity change)
    pub force: f32,
    /// Energy урон каждому персонажу в радиусе
    pub damage: f32,
    /// Effect id взрыва (one-shot)
    pub effect_id: String,
    /// true → scale эффекта = radius / 10
    pub auto_scale: bool,
    /// Scale эффекта при auto_scale = false
    pub scale: Vec3,
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            force: 25.0,
            damage: 20.0,
            effect_id: "FireballExplosion".to_string(),
            auto_scale: true,
            scale: Vec3::ONE,
        }
    }
}

impl BlastConfig {
    /// Validated constructor (radius > 0, force ≥ 0, damage ≥ 0)
    pub fn new(
        radius: f32,
        force: f32,
        damage: f32,
        effect_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            radius: require_positive("blast radius", radius)?,
            force: require_non_negative("blast force", force)?,
            damage: require_non_negative("blast damage", damage)?,
            effect_id: effect_id.into(),
            ..Default::default()
        })
    }

    /// Builder: явный scale (отключает auto-scale)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.auto_scale = false;
        self.scale = scale;
        self
    }

    pub fn effect_scale(&self) -> Vec3 {
        if self.auto_scale {
            Vec3::splat(self.radius / EFFECT_REFERENCE_RADIUS)
        } else {
            self.scale
        }
    }
}

/// Какие тела заранее считаются "уже отброшенными" (не получают impulse)
///
/// Урон это не затрагивает: взрывающийся предмет и игрок никогда не получают blast урон.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImpulseExemption {
    /// Только тело самого предмета
    #[default]
    OwnBody,
    /// Тело предмета + тело персонажа игрока
    OwnBodyAndPlayer,
    /// Impulse получают все подходящие тела (включая сам предмет)
    Nobody,
}

impl ImpulseExemption {
    pub fn exempts_own_body(self) -> bool {
        !matches!(self, ImpulseExemption::Nobody)
    }

    pub fn exempts_player(self) -> bool {
        matches!(self, ImpulseExemption::OwnBodyAndPlayer)
    }
}

/// AreaEffect — предмет взрывается при контакте
///
/// Igniter композиция явная: `igniter = Some(..)` → поджигает задетых персонажей.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AreaEffect {
    pub blast: BlastConfig,
    pub igniter: Option<IgniteConfig>,
    pub exemption: ImpulseExemption,
}

impl AreaEffect {
    pub fn new(blast: BlastConfig) -> Self {
        Self {
            blast,
            igniter: None,
            exemption: ImpulseExemption::default(),
        }
    }

    pub fn with_igniter(mut self, igniter: IgniteConfig) -> Self {
        self.igniter = Some(igniter);
        self
    }

    pub fn with_exemption(mut self, exemption: ImpulseExemption) -> Self {
        self.exemption = exemption;
        self
    }
}

/// Bounding radius коллайдера для overlap query (коллайдер задет, если его
/// поверхность, а не только центр, попадает в радиус)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BlastExtent(pub f32);
