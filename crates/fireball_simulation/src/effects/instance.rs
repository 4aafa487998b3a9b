//! Effect instances — живые VFX в мире
//!
//! ECS владеет состоянием playback (intensity, renderer, playing).
//! Хост (рендер) синхронизирует визуал по `EffectPlayback` событиям.
//! Stop идемпотентен: `Stopped` событие уходит ровно один раз на instance.

use bevy::ecs::world::DeferredWorld;
use bevy::prelude::*;

use super::catalog::{EffectCatalog, EffectData, EffectId};
use crate::error::ConfigError;

/// Куда рендерить эффект
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum EffectRenderer {
    /// Default renderer сцены
    #[default]
    Default,
    /// VFX surface конкретного персонажа (горение "по телу")
    Surface(Entity),
}

/// Размещение эффекта при spawn
#[derive(Debug, Clone, Copy)]
pub enum EffectPlacement {
    /// Свободно в мире (позиция + ориентация + scale)
    World(Transform),
    /// Child entity (следует за parent, например root part персонажа)
    Attached { parent: Entity },
}

/// Живой экземпляр эффекта
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EffectInstance {
    pub effect_id: EffectId,
    pub renderer: EffectRenderer,
    /// 0.0..=1.0
    pub intensity: f32,
    pub looping: bool,
    pub playing: bool,
}

impl EffectInstance {
    pub fn new(data: &EffectData, renderer: EffectRenderer) -> Self {
        Self {
            effect_id: data.id.clone(),
            renderer,
            intensity: 0.0,
            looping: data.looping,
            playing: false,
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Останавливает playback. Возвращает true если эффект играл.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Event: изменение playback (ECS → host)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum EffectPlayback {
    Started { instance: Entity, effect_id: EffectId },
    Stopped { instance: Entity },
}

/// Spawn + play эффекта на максимальной интенсивности
///
/// # Errors
/// `ConfigError::UnknownEffect` — id не зарегистрирован (фатально для вызывающего)
pub fn spawn_effect(
    commands: &mut Commands,
    catalog: &EffectCatalog,
    effect_id: &str,
    placement: EffectPlacement,
    renderer: EffectRenderer,
) -> Result<Entity, ConfigError> {
    let data = catalog.resolve(effect_id)?;

    let mut instance = EffectInstance::new(data, renderer);
    instance.set_intensity(1.0);
    instance.play();

    let entity = match placement {
        EffectPlacement::World(transform) => commands.spawn((instance, transform)).id(),
        EffectPlacement::Attached { parent } => commands
            .spawn((instance, Transform::IDENTITY, ChildOf(parent)))
            .id(),
    };

    commands.send_event(EffectPlayback::Started {
        instance: entity,
        effect_id: data.id.clone(),
    });

    Ok(entity)
}

/// Stop + despawn (если эффект ещё играет)
pub fn stop_effect(commands: &mut Commands, entity: Entity, instance: &mut EffectInstance) -> bool {
    if !instance.stop() {
        return false;
    }

    commands.send_event(EffectPlayback::Stopped { instance: entity });
    commands.entity(entity).try_despawn();
    true
}

/// То же что `stop_effect`, но из component hook
///
/// Эффект мог быть уже удалён (despawn персонажа со всеми children) — это не ошибка.
pub(crate) fn stop_effect_deferred(world: &mut DeferredWorld, entity: Entity) -> bool {
    let was_playing = world
        .get_mut::<EffectInstance>(entity)
        .is_some_and(|mut instance| instance.stop());

    if was_playing {
        let mut commands = world.commands();
        commands.send_event(EffectPlayback::Stopped { instance: entity });
        commands.entity(entity).try_despawn();
    }

    was_playing
}
