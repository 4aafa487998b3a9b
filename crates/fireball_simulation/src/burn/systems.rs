//! Burn systems: поджог и тики горения

use bevy::ecs::error::Result;
use bevy::prelude::*;

use super::config::{IgniteConfig, Igniter};
use super::status::Burning;
use crate::combat::{CharacterLookup, ContactStarted, DamageRequest, DamageType};
use crate::components::{CharacterRig, Dead, Health, Item};
use crate::effects::{
    spawn_effect, stop_effect, EffectCatalog, EffectInstance, EffectPlacement, EffectRenderer,
};
use crate::error::ConfigError;
use crate::logger;

/// Поджечь персонажа
///
/// Spawn looping эффекта горения на root part (рендер на VFX surface персонажа)
/// и вставка свежего `Burning` (elapsed = 0). Существующий Burning заменяется,
/// его эффект останавливает hook.
///
/// # Errors
/// `ConfigError::UnknownEffect` — effect id горения не зарегистрирован
pub fn ignite(
    commands: &mut Commands,
    catalog: &EffectCatalog,
    target: Entity,
    rig: &CharacterRig,
    config: &IgniteConfig,
    source: Option<Entity>,
) -> Result<Entity, ConfigError> {
    let effect = spawn_effect(
        commands,
        catalog,
        &config.effect_id,
        EffectPlacement::Attached {
            parent: rig.root_part,
        },
        EffectRenderer::Surface(rig.vfx_renderer),
    )?;

    commands
        .entity(target)
        .try_insert(Burning::new(config, effect, source));

    logger::log(&format!(
        "🔥 Ignite {:?}: {} dps for {}s (source: {:?})",
        target, config.damage_per_second, config.duration, source
    ));

    Ok(effect)
}

/// Система: прямой контакт Igniter предмета → поджог персонажа
///
/// Без проверок расстояния/игрока/уже горит: горение всегда перезапускается.
/// Source = last handler предмета.
pub fn ignite_on_contact(
    mut commands: Commands,
    mut contacts: EventReader<ContactStarted>,
    igniters: Query<(&Igniter, Option<&Item>)>,
    rigs: Query<&CharacterRig>,
    lookup: CharacterLookup,
    catalog: Res<EffectCatalog>,
) -> Result {
    for contact in contacts.read() {
        let Ok((igniter, item)) = igniters.get(contact.source) else {
            continue;
        };
        let Some(character) = lookup.owning_character(contact.collider) else {
            continue;
        };
        let Ok(rig) = rigs.get(character) else {
            continue;
        };

        let source = item.and_then(|item| item.last_handler);
        ignite(&mut commands, &catalog, character, rig, &igniter.config, source)?;
    }

    Ok(())
}

/// Система: тик горения (FixedUpdate)
///
/// - Active: урон dps × delta по root part (мёртвым урон не идёт, таймер идёт)
/// - Expired: остановить эффект, снять Burning
pub fn tick_burning(
    mut commands: Commands,
    mut burning: Query<(Entity, &mut Burning, &Health, Option<&CharacterRig>, Has<Dead>)>,
    mut effects: Query<&mut EffectInstance>,
    mut damage_requests: EventWriter<DamageRequest>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut burn, health, rig, is_dead) in burning.iter_mut() {
        let tick = burn.advance(delta);

        if tick.damage > 0.0 && health.is_alive() && !is_dead {
            damage_requests.write(DamageRequest {
                target: entity,
                part: rig.map_or(entity, |rig| rig.root_part),
                damage_type: DamageType::Energy,
                amount: tick.damage,
                source: burn.source,
            });
        }

        if tick.expired {
            if let Ok(mut instance) = effects.get_mut(burn.effect) {
                stop_effect(&mut commands, burn.effect, &mut instance);
            }
            commands.entity(entity).try_remove::<Burning>();

            logger::log(&format!("Burn expired on {:?}", entity));
        }
    }
}
