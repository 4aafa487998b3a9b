//! Базовые компоненты персонажей: Character, Health, LastInteraction, Player

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::collision_layers::{LAYER_NPC, LAYER_PLAYER, LAYER_RAGDOLL, PHYSICAL_MASK};
use crate::components::{BodyPart, CharacterRig, Ragdoll, VfxRenderer};

/// Персонаж (NPC или игрок) — живое существо с ragdoll
///
/// Автоматически добавляет Health, Ragdoll, LastInteraction через Required Components.
/// `CharacterRig` (root part + VFX surface) вставляется spawn helper'ом.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Ragdoll, LastInteraction)]
pub struct Character;

/// Marker: персонаж локального игрока
///
/// Blast никогда не наносит урон локальному игроку (даже внутри радиуса).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: персонаж мёртв (ставится `mark_dead` по EntityDied)
#[derive(Component, Debug, Clone, Copy)]
pub struct Dead;

/// Здоровье персонажа
///
/// f32: burn наносит непрерывный урон (dps × delta).
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Возвращает фактически снятое здоровье
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let applied = amount.max(0.0).min(self.current);
        self.current -= applied;
        applied
    }
}

/// Последний источник взаимодействия (кто "виноват" в уроне)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LastInteraction {
    pub actor: Option<Entity>,
    /// Время взаимодействия (секунды от старта симуляции)
    pub time: f32,
}

impl LastInteraction {
    pub fn record(&mut self, actor: Entity, time: f32) {
        self.actor = Some(actor);
        self.time = time;
    }
}

/// Spawn helper: NPC персонаж с полным rig
///
/// Создаёт:
/// - character entity (Transform, Health, Ragdoll, dynamic body на NPC слое)
/// - root part (BodyPart, child, ragdoll слой) — цель урона и якорь burn VFX
/// - VFX renderer surface (child)
pub fn spawn_character(commands: &mut Commands, position: Vec3, max_health: f32) -> Entity {
    spawn_character_on_layer(commands, position, max_health, LAYER_NPC)
}

/// Spawn helper: персонаж локального игрока (Player marker, player слой)
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    let player = spawn_character_on_layer(commands, position, 100.0, LAYER_PLAYER);
    commands.entity(player).insert(Player);
    player
}

fn spawn_character_on_layer(
    commands: &mut Commands,
    position: Vec3,
    max_health: f32,
    layer: Group,
) -> Entity {
    let character = commands
        .spawn((
            Character,
            Health::new(max_health),
            Transform::from_translation(position),
            // Rapier: locomotion тело персонажа
            RigidBody::Dynamic,
            Velocity::default(),
            Collider::capsule_y(0.5, 0.4),
            CollisionGroups::new(layer, PHYSICAL_MASK),
        ))
        .id();

    let root_part = commands
        .spawn((
            BodyPart { character },
            Transform::from_xyz(0.0, 0.9, 0.0),
            Collider::ball(0.25),
            CollisionGroups::new(LAYER_RAGDOLL, PHYSICAL_MASK),
            ChildOf(character),
        ))
        .id();

    let vfx_renderer = commands
        .spawn((VfxRenderer { character }, Transform::default(), ChildOf(character)))
        .id();

    commands.entity(character).insert(CharacterRig {
        root_part,
        vfx_renderer,
    });

    character
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100.0);

        assert_eq!(health.take_damage(30.0), 30.0);
        assert_eq!(health.current, 70.0);
        assert!(health.is_alive());

        // Clamped: снимается только остаток
        assert_eq!(health.take_damage(100.0), 70.0);
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_ignores_negative_damage() {
        let mut health = Health::new(50.0);
        assert_eq!(health.take_damage(-10.0), 0.0);
        assert_eq!(health.current, 50.0);
    }

    #[test]
    fn test_last_interaction_record() {
        let mut interaction = LastInteraction::default();
        assert!(interaction.actor.is_none());

        interaction.record(Entity::PLACEHOLDER, 4.5);
        assert_eq!(interaction.actor, Some(Entity::PLACEHOLDER));
        assert_eq!(interaction.time, 4.5);
    }
}
