//! Collision Layers Constants
//!
//! Physics layers как Rapier `Group` — centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **memberships:** на каком слое объект находится
//! - **filters:** с какими слоями объект коллидирует
//!
//! ## Layers:
//! - GROUP_1: Default (props, всё без явных CollisionGroups)
//! - GROUP_2: Environment (static geometry — стены, пол)
//! - GROUP_3: Items (оружие, снаряды, файерболы)
//! - GROUP_4: Ragdoll parts
//! - GROUP_5: NPC (reserved — locomotion тела NPC, в том числе мёртвых)
//! - GROUP_6: Player
//! - GROUP_7: Triggers (sensors, не физические)
//!
//! ## Использование:
//! ```ignore
//! use crate::collision_layers::*;
//!
//! commands.spawn((Collider::ball(0.5), CollisionGroups::new(LAYER_ITEM, BLAST_QUERY_MASK)));
//! ```

use bevy_rapier3d::prelude::{CollisionGroups, Group};

// ============================================================================
// Layers (на каком слое объект находится)
// ============================================================================

pub const LAYER_DEFAULT: Group = Group::GROUP_1;

pub const LAYER_ENVIRONMENT: Group = Group::GROUP_2;

pub const LAYER_ITEM: Group = Group::GROUP_3;

pub const LAYER_RAGDOLL: Group = Group::GROUP_4;

/// NPC-reserved слой: blast impulse сюда не применяется
/// (NPC получают targeted обработку в character pass)
pub const LAYER_NPC: Group = Group::GROUP_5;

pub const LAYER_PLAYER: Group = Group::GROUP_6;

pub const LAYER_TRIGGER: Group = Group::GROUP_7;

// ============================================================================
// Masks
// ============================================================================

/// Interactable physical layers — blast overlap query
///
/// Environment и triggers исключены (static / non-physical).
pub const BLAST_QUERY_MASK: Group = LAYER_DEFAULT
    .union(LAYER_ITEM)
    .union(LAYER_RAGDOLL)
    .union(LAYER_NPC)
    .union(LAYER_PLAYER);

/// Слои, тела которых никогда не получают blast impulse
pub const IMPULSE_EXCLUDED_LAYERS: Group = LAYER_NPC;

/// Mask для физических тел (collide со всем физическим, кроме triggers)
pub const PHYSICAL_MASK: Group = BLAST_QUERY_MASK.union(LAYER_ENVIRONMENT);

// ============================================================================
// Helpers
// ============================================================================

/// Слой коллайдера (без CollisionGroups → default layer)
pub fn memberships(groups: Option<&CollisionGroups>) -> Group {
    groups.map_or(LAYER_DEFAULT, |groups| groups.memberships)
}

/// Получить название слоя для debug логов
pub fn layer_name(layer: Group) -> &'static str {
    const NAMES: [(Group, &str); 7] = [
        (LAYER_DEFAULT, "Default"),
        (LAYER_ENVIRONMENT, "Environment"),
        (LAYER_ITEM, "Item"),
        (LAYER_RAGDOLL, "Ragdoll"),
        (LAYER_NPC, "NPC"),
        (LAYER_PLAYER, "Player"),
        (LAYER_TRIGGER, "Trigger"),
    ];

    NAMES
        .iter()
        .find(|(group, _)| *group == layer)
        .map_or("Unknown", |(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blast_mask_excludes_static_and_triggers() {
        assert!(!BLAST_QUERY_MASK.intersects(LAYER_ENVIRONMENT));
        assert!(!BLAST_QUERY_MASK.intersects(LAYER_TRIGGER));
        assert!(BLAST_QUERY_MASK.contains(LAYER_ITEM | LAYER_RAGDOLL | LAYER_NPC));
    }

    #[test]
    fn test_missing_groups_means_default_layer() {
        assert_eq!(memberships(None), LAYER_DEFAULT);
        let groups = CollisionGroups::new(LAYER_ITEM, PHYSICAL_MASK);
        assert_eq!(memberships(Some(&groups)), LAYER_ITEM);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(LAYER_NPC), "NPC");
        assert_eq!(layer_name(LAYER_ITEM | LAYER_NPC), "Unknown");
    }
}
