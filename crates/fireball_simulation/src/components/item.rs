//! Item компонент: физический объект, который кто-то держал/бросил

use bevy::prelude::*;

/// Предмет (файербол, граната и т.п.)
///
/// `last_handler` — актор, который последним держал предмет.
/// Используется как "виновник" урона от взрыва и горения.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Item {
    pub last_handler: Option<Entity>,
}

impl Item {
    pub fn handled_by(handler: Entity) -> Self {
        Self {
            last_handler: Some(handler),
        }
    }

    /// Хост вызывает при grab/throw
    pub fn set_handler(&mut self, handler: Entity) {
        self.last_handler = Some(handler);
    }
}
