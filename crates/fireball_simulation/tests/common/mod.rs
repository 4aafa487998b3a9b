//! Общие helpers для integration тестов

#![allow(dead_code)]

use bevy::prelude::*;
use fireball_simulation::*;

/// Все события типа E, записанные за время теста
#[derive(Resource)]
pub struct Recorded<E: Event + Clone> {
    pub events: Vec<E>,
}

impl<E: Event + Clone> Default for Recorded<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.events.extend(reader.read().cloned());
}

/// Записывать события E в `Last` (после FixedUpdate того же кадра)
pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>()
        .add_systems(Last, record::<E>);
}

pub fn recorded<E: Event + Clone>(app: &App) -> &[E] {
    &app.world().resource::<Recorded<E>>().events
}

/// Полный App: SimulationPlugin + запись событий + warm-up
pub fn create_fireball_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    record_events::<DamageDealt>(&mut app);
    record_events::<EntityDied>(&mut app);
    record_events::<EffectPlayback>(&mut app);
    record_events::<BlastResolved>(&mut app);

    // Warm-up: первый update с нулевым delta
    app.update();
    app
}

/// Выполнить spawn helper'ы и сразу применить команды
pub fn with_commands<R>(app: &mut App, f: impl FnOnce(&mut Commands, &EffectCatalog) -> R) -> R {
    let world = app.world_mut();
    let catalog = world.resource::<EffectCatalog>().clone();
    let result = {
        let mut commands = world.commands();
        f(&mut commands, &catalog)
    };
    world.flush();
    result
}

/// Fireball (взрыв + поджог, параметры по умолчанию), брошенный `handler`
pub fn spawn_fireball(app: &mut App, position: Vec3, handler: Option<Entity>) -> Entity {
    spawn_item(app, &ItemModules::fireball(), position, handler)
}

pub fn spawn_item(
    app: &mut App,
    modules: &ItemModules,
    position: Vec3,
    handler: Option<Entity>,
) -> Entity {
    with_commands(app, |commands, catalog| {
        spawn_explosive_item(
            commands,
            catalog,
            modules,
            Transform::from_translation(position),
            handler,
        )
        .expect("valid item modules")
    })
}

pub fn spawn_npc(app: &mut App, position: Vec3) -> Entity {
    with_commands(app, |commands, _| spawn_character(commands, position, 100.0))
}

pub fn spawn_local_player(app: &mut App, position: Vec3) -> Entity {
    with_commands(app, |commands, _| spawn_player(commands, position))
}

/// Контакт предмета `source` с `collider` в точке `point` (нормаль вверх)
pub fn send_contact(app: &mut App, source: Entity, collider: Entity, point: Vec3) {
    app.world_mut().send_event(ContactStarted {
        source,
        collider,
        point,
        normal: Vec3::Y,
        source_transform: Transform::from_translation(point),
    });
}

/// Взрыв предмета в точке (контакт с землёй = с самим собой)
pub fn detonate(app: &mut App, explosive: Entity, point: Vec3) {
    send_contact(app, explosive, explosive, point);
    app.update();
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

pub fn health(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).expect("character has Health").current
}

pub fn damage_to(app: &App, target: Entity) -> Vec<DamageDealt> {
    recorded::<DamageDealt>(app)
        .iter()
        .filter(|event| event.target == target)
        .cloned()
        .collect()
}

pub fn stopped_count(app: &App, effect: Entity) -> usize {
    recorded::<EffectPlayback>(app)
        .iter()
        .filter(|event| **event == EffectPlayback::Stopped { instance: effect })
        .count()
}
