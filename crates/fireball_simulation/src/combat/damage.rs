//! Damage model: typed damage events → Health, death handling
//!
//! Blast и burn НЕ трогают Health напрямую — они пишут `DamageRequest`,
//! `apply_damage` применяет урон и генерирует `DamageDealt` / `EntityDied`.

use bevy::prelude::*;

use crate::components::{Dead, Health, Ragdoll, RagdollState};
use crate::logger;

/// Тип урона (единственный тег, без резистов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageType {
    Energy,
    Fire,
    Blunt,
    Pierce,
    Slash,
}

/// Event: нанести урон конкретной части тела
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    /// Body part, по которой пришёлся урон (root part для blast/burn)
    pub part: Entity,
    pub damage_type: DamageType,
    pub amount: f32,
    /// Кто виноват (last handler предмета), если известен
    pub source: Option<Entity>,
}

/// Event: урон применён
///
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub part: Entity,
    pub damage_type: DamageType,
    /// Запрошенный урон
    pub amount: f32,
    /// Фактически снятое здоровье (≤ amount)
    pub applied: f32,
    pub source: Option<Entity>,
    pub target_died: bool,
}

/// Event: персонаж умер (health дошёл до 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: apply damage от DamageRequest событий
///
/// 1. Читаем DamageRequest события
/// 2. Применяем damage к Health
/// 3. Генерируем DamageDealt и EntityDied события
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut entity_died: EventWriter<EntityDied>,
    mut targets: Query<&mut Health>,
) {
    for request in requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            logger::log_warning(&format!(
                "DamageRequest: target {:?} has no Health component",
                request.target
            ));
            continue;
        };

        let was_alive = health.is_alive();
        let applied = health.take_damage(request.amount);
        let target_died = was_alive && !health.is_alive();

        damage_dealt.write(DamageDealt {
            target: request.target,
            part: request.part,
            damage_type: request.damage_type,
            amount: request.amount,
            applied,
            source: request.source,
            target_died,
        });

        if target_died {
            entity_died.write(EntityDied {
                entity: request.target,
                killer: request.source,
            });

            logger::log_info(&format!(
                "💀 Entity {:?} killed by {:?} ({:?})",
                request.target, request.source, request.damage_type
            ));
        }
    }
}

/// Система: смерть → Dead marker + ragdoll Inert
pub fn mark_dead(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut ragdolls: Query<&mut Ragdoll>,
) {
    for event in deaths.read() {
        if let Ok(mut ragdoll) = ragdolls.get_mut(event.entity) {
            ragdoll.set_state(RagdollState::Inert);
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.try_insert(Dead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_request_event() {
        let request = DamageRequest {
            target: Entity::PLACEHOLDER,
            part: Entity::PLACEHOLDER,
            damage_type: DamageType::Energy,
            amount: 20.0,
            source: None,
        };

        assert_eq!(request.amount, 20.0);
        assert_eq!(request.damage_type, DamageType::Energy);
    }

    #[test]
    fn test_apply_damage_system() {
        let mut world = World::new();
        world.init_resource::<Events<DamageRequest>>();
        world.init_resource::<Events<DamageDealt>>();
        world.init_resource::<Events<EntityDied>>();

        let target = world.spawn(Health::new(30.0)).id();
        world.send_event(DamageRequest {
            target,
            part: target,
            damage_type: DamageType::Energy,
            amount: 20.0,
            source: None,
        });
        world.send_event(DamageRequest {
            target,
            part: target,
            damage_type: DamageType::Fire,
            amount: 20.0,
            source: None,
        });

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(bevy::ecs::schedule::ExecutorKind::SingleThreaded);
        schedule.add_systems(apply_damage);
        schedule.run(&mut world);

        assert_eq!(world.get::<Health>(target).unwrap().current, 0.0);

        let dealt: Vec<DamageDealt> = world
            .resource::<Events<DamageDealt>>()
            .iter_current_update_events()
            .cloned()
            .collect();
        assert_eq!(dealt.len(), 2);
        assert_eq!(dealt[0].applied, 20.0);
        assert!(!dealt[0].target_died);
        // Второй удар снял только остаток
        assert_eq!(dealt[1].applied, 10.0);
        assert!(dealt[1].target_died);

        assert_eq!(world.resource::<Events<EntityDied>>().len(), 1);
    }
}
