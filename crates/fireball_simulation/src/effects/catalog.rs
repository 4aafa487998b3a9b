//! Effect catalog — lookup VFX по string id
//!
//! **EffectData** — статический blueprint (id + prefab + looping):
//! - Хранится в `EffectCatalog` resource (HashMap lookup)
//! - Создаются hardcoded в `EffectCatalog::default()`, хост может добавить свои
//!
//! Неизвестный id — фатальная ошибка конфигурации (`ConfigError::UnknownEffect`).

use bevy::prelude::*;
use std::collections::HashMap;

use crate::error::ConfigError;

/// Effect identifier (unique string ID)
///
/// # Examples
/// - "FireballExplosion"
/// - "ImbueFireRagdoll"
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct EffectId(pub String);

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static effect definition
#[derive(Clone, Debug, Reflect)]
pub struct EffectData {
    pub id: EffectId,
    /// Prefab визуала на стороне хоста
    pub prefab_path: String,
    /// Looping (горение) vs one-shot (взрыв)
    pub looping: bool,
}

impl EffectData {
    pub fn one_shot(id: &str, prefab_path: &str) -> Self {
        Self {
            id: id.into(),
            prefab_path: prefab_path.to_string(),
            looping: false,
        }
    }

    pub fn looping(id: &str, prefab_path: &str) -> Self {
        Self {
            id: id.into(),
            prefab_path: prefab_path.to_string(),
            looping: true,
        }
    }
}

/// Resource: все известные эффекты
#[derive(Resource, Debug, Clone)]
pub struct EffectCatalog {
    effects: HashMap<EffectId, EffectData>,
}

impl Default for EffectCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.register(EffectData::one_shot(
            "FireballExplosion",
            "res://effects/fireball_explosion.tscn",
        ));
        catalog.register(EffectData::looping(
            "ImbueFireRagdoll",
            "res://effects/imbue_fire_ragdoll.tscn",
        ));
        catalog
    }
}

impl EffectCatalog {
    pub fn empty() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    /// Регистрирует (или заменяет) эффект
    pub fn register(&mut self, data: EffectData) {
        self.effects.insert(data.id.clone(), data);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.effects.contains_key(&EffectId::from(id))
    }

    pub fn resolve(&self, id: &str) -> Result<&EffectData, ConfigError> {
        self.effects
            .get(&EffectId::from(id))
            .ok_or_else(|| ConfigError::UnknownEffect(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_stock_effects() {
        let catalog = EffectCatalog::default();
        assert_eq!(catalog.len(), 2);

        let explosion = catalog.resolve("FireballExplosion").unwrap();
        assert!(!explosion.looping);

        let burn = catalog.resolve("ImbueFireRagdoll").unwrap();
        assert!(burn.looping);
    }

    #[test]
    fn test_unknown_effect_is_config_error() {
        let catalog = EffectCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.resolve("Nope").unwrap_err(),
            ConfigError::UnknownEffect("Nope".into())
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = EffectCatalog::empty();
        catalog.register(EffectData::one_shot("Spark", "res://a.tscn"));
        catalog.register(EffectData::looping("Spark", "res://b.tscn"));

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("Spark"));
        assert_eq!(catalog.resolve("Spark").unwrap().prefab_path, "res://b.tscn");
    }
}
