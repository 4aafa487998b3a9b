//! Fireball Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: взрывающиеся предметы + горение
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game rules (blast resolution, ignition, burn ticks, damage)
//! - Host = physics contacts, rendering, VFX playback

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod burn;
pub mod collision_layers;
pub mod combat;
pub mod components;
pub mod effects;
pub mod error;
pub mod explosive;
pub mod logger;
pub mod modules;

// Re-export базовых типов для удобства
pub use burn::{ignite, BurnPhase, Burning, IgniteConfig, Igniter};
pub use combat::{
    CombatPlugin, ContactStarted, DamageDealt, DamageRequest, DamageType, EntityDied,
};
pub use components::*;
pub use effects::{EffectCatalog, EffectInstance, EffectPlayback, EffectRenderer};
pub use error::ConfigError;
pub use explosive::{AreaEffect, BlastConfig, BlastExtent, BlastResolved, ImpulseExemption};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use modules::{spawn_explosive_item, BurnModule, ExplosionModule, ItemModules};

/// Частота simulation tick (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Каталог эффектов: хост может зарегистрировать свой до plugin
            .init_resource::<EffectCatalog>()
            .add_plugins(CombatPlugin);

        // Детерминистичный RNG (seed по умолчанию, если create_headless_app не задал)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Случайная точка на кольце [min_radius, max_radius) вокруг center (XZ плоскость)
    pub fn point_in_ring(&mut self, center: Vec3, min_radius: f32, max_radius: f32) -> Vec3 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = self.rng.gen_range(min_radius..max_radius);
        center + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную: каждый `app.update()` = ровно один FixedUpdate тик
/// (первый update — warm-up с нулевым delta).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_ring_deterministic() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);

        for _ in 0..10 {
            let pa = a.point_in_ring(Vec3::ZERO, 2.0, 8.0);
            let pb = b.point_in_ring(Vec3::ZERO, 2.0, 8.0);
            assert_eq!(pa, pb);

            let distance = pa.length();
            assert!((2.0 - 1e-4..8.0 + 1e-4).contains(&distance), "distance = {}", distance);
        }
    }

    #[test]
    fn test_simulation_plugin_keeps_seed() {
        let mut app = create_headless_app(1234);
        app.add_plugins(SimulationPlugin);

        assert_eq!(app.world().resource::<DeterministicRng>().seed, 1234);
        assert!(app.world().contains_resource::<EffectCatalog>());
    }
}
