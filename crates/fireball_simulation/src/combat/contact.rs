//! Contact delivery: host physics → ECS
//!
//! Хост отправляет `ContactStarted` при первом контакте collision handler'а предмета.
//! Обработчики (blast, igniter) реагируют синхронно в том же FixedUpdate тике.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{BodyPart, Character};

/// Глубина подъёма по ChildOf при поиске персонажа-владельца коллайдера
const MAX_HIERARCHY_DEPTH: usize = 8;

/// Event: первый контакт предмета с коллайдером (host → ECS)
#[derive(Event, Debug, Clone)]
pub struct ContactStarted {
    /// Предмет, чей collision handler сработал
    pub source: Entity,
    /// Коллайдер, с которым столкнулись
    pub collider: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    /// Transform коллайдер-группы источника (reference up для ориентации VFX)
    pub source_transform: Transform,
}

impl ContactStarted {
    pub fn source_up(&self) -> Vec3 {
        self.source_transform.up().as_vec3()
    }
}

/// SystemParam: resolve коллайдер → персонаж-владелец
///
/// Коллайдер принадлежит персонажу если:
/// - это сам персонаж
/// - это BodyPart персонажа
/// - это потомок (ChildOf) одного из вышеперечисленных
#[derive(SystemParam)]
pub struct CharacterLookup<'w, 's> {
    characters: Query<'w, 's, (), With<Character>>,
    body_parts: Query<'w, 's, &'static BodyPart>,
    parents: Query<'w, 's, &'static ChildOf>,
}

impl CharacterLookup<'_, '_> {
    pub fn owning_character(&self, collider: Entity) -> Option<Entity> {
        let mut current = collider;

        for _ in 0..MAX_HIERARCHY_DEPTH {
            if self.characters.contains(current) {
                return Some(current);
            }
            if let Ok(part) = self.body_parts.get(current) {
                return Some(part.character);
            }
            current = self.parents.get(current).ok()?.parent();
        }

        None
    }
}
