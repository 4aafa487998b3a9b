//! Item modules — конфигурация предмета → behavior компоненты
//!
//! # Архитектура
//!
//! **ExplosionModule / BurnModule** — сериализуемые параметры предмета:
//! - camelCase поля (формат item data)
//! - Отсутствующие поля → значения по умолчанию
//!
//! **ItemModules::on_item_loaded** — валидирует и вешает компоненты:
//! - explosion → `AreaEffect` (burn, если есть, становится его igniter)
//! - burn → `Igniter` (прямой контакт)
//!
//! # Пример
//!
//! ```rust,ignore
//! let modules: ItemModules = serde_json::from_str(json)?;
//! let fireball = spawn_explosive_item(&mut commands, &catalog, &modules, transform, Some(player))?;
//! ```

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::burn::{IgniteConfig, Igniter};
use crate::collision_layers::{LAYER_ITEM, PHYSICAL_MASK};
use crate::components::Item;
use crate::effects::EffectCatalog;
use crate::error::ConfigError;
use crate::explosive::{AreaEffect, BlastConfig, ImpulseExemption};
use crate::logger;

// ============================================================================
// ExplosionModule
// ============================================================================

/// Параметры взрыва предмета
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplosionModule {
    pub explosion_radius: f32,
    pub explosion_force: f32,
    pub explosion_damage: f32,
    pub explosion_effect_id: String,
    pub explosion_effect_auto_scaling: bool,
    pub explosion_effect_scale: [f32; 3],
    pub impulse_exemption: ImpulseExemption,
}

impl Default for ExplosionModule {
    fn default() -> Self {
        Self {
            explosion_radius: 10.0,
            explosion_force: 25.0,
            explosion_damage: 20.0,
            explosion_effect_id: "FireballExplosion".to_string(),
            explosion_effect_auto_scaling: true,
            explosion_effect_scale: [1.0, 1.0, 1.0],
            impulse_exemption: ImpulseExemption::default(),
        }
    }
}

impl ExplosionModule {
    pub fn to_config(&self) -> Result<BlastConfig, ConfigError> {
        let mut config = BlastConfig::new(
            self.explosion_radius,
            self.explosion_force,
            self.explosion_damage,
            self.explosion_effect_id.clone(),
        )?;
        config.auto_scale = self.explosion_effect_auto_scaling;
        config.scale = Vec3::from_array(self.explosion_effect_scale);
        Ok(config)
    }
}

// ============================================================================
// BurnModule
// ============================================================================

/// Параметры поджога предмета
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BurnModule {
    pub burn_damage_per_second: f32,
    pub burn_duration: f32,
    pub burn_effect_id: String,
}

impl Default for BurnModule {
    fn default() -> Self {
        Self {
            burn_damage_per_second: 5.0,
            burn_duration: 10.0,
            burn_effect_id: "ImbueFireRagdoll".to_string(),
        }
    }
}

impl BurnModule {
    pub fn to_config(&self) -> Result<IgniteConfig, ConfigError> {
        IgniteConfig::new(
            self.burn_damage_per_second,
            self.burn_duration,
            self.burn_effect_id.clone(),
        )
    }
}

// ============================================================================
// ItemModules
// ============================================================================

/// Набор модулей предмета (оба опциональны)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemModules {
    pub explosion: Option<ExplosionModule>,
    pub burn: Option<BurnModule>,
}

impl ItemModules {
    /// Fireball: взрыв + поджог с параметрами по умолчанию
    pub fn fireball() -> Self {
        Self {
            explosion: Some(ExplosionModule::default()),
            burn: Some(BurnModule::default()),
        }
    }

    /// Валидирует модули и вешает behavior компоненты на предмет
    ///
    /// # Errors
    /// - `InvalidParameter` — число вне допустимого диапазона
    /// - `UnknownEffect` — effect id не зарегистрирован в каталоге
    pub fn on_item_loaded(
        &self,
        item: &mut EntityCommands,
        catalog: &EffectCatalog,
    ) -> Result<(), ConfigError> {
        let igniter = self
            .burn
            .as_ref()
            .map(BurnModule::to_config)
            .transpose()?;
        if let Some(config) = &igniter {
            catalog.resolve(&config.effect_id)?;
            item.insert(Igniter {
                config: config.clone(),
            });
        }

        if let Some(explosion) = &self.explosion {
            let blast = explosion.to_config()?;
            catalog.resolve(&blast.effect_id)?;

            let mut area = AreaEffect::new(blast).with_exemption(explosion.impulse_exemption);
            area.igniter = igniter;
            item.insert(area);
        }

        logger::log(&format!(
            "Item {:?} loaded: explosion={}, burn={}",
            item.id(),
            self.explosion.is_some(),
            self.burn.is_some()
        ));

        Ok(())
    }
}

/// Spawn helper: физический предмет с модулями (fireball и т.п.)
///
/// Dynamic тело на item слое; `last_handler` — кто бросил (responsible actor).
pub fn spawn_explosive_item(
    commands: &mut Commands,
    catalog: &EffectCatalog,
    modules: &ItemModules,
    transform: Transform,
    last_handler: Option<Entity>,
) -> Result<Entity, ConfigError> {
    let mut item = commands.spawn((
        Item { last_handler },
        transform,
        RigidBody::Dynamic,
        Velocity::default(),
        Collider::ball(0.2),
        CollisionGroups::new(LAYER_ITEM, PHYSICAL_MASK),
    ));

    if let Err(error) = modules.on_item_loaded(&mut item, catalog) {
        item.despawn();
        return Err(error);
    }

    Ok(item.id())
}
