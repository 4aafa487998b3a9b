//! Headless симуляция fireball
//!
//! Сценарий: игрок бросает fireball в группу NPC, горение до полного затухания.

use bevy::prelude::*;
use fireball_simulation::*;

const NPC_COUNT: usize = 6;

fn main() {
    let seed = 42;
    println!("Starting fireball headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let (fireball, npcs) = match setup_scenario(app.world_mut()) {
        Ok(scenario) => scenario,
        Err(error) => {
            log_error(&format!("Scenario setup failed: {}", error));
            std::process::exit(1);
        }
    };

    // Warm-up (нулевой delta)
    app.update();

    // Контакт fireball с землёй в центре группы
    app.world_mut().send_event(ContactStarted {
        source: fireball,
        collider: fireball,
        point: Vec3::ZERO,
        normal: Vec3::Y,
        source_transform: Transform::from_xyz(0.0, 0.5, 0.0),
    });

    // 12 секунд: весь burn (10s) + запас
    for tick in 1..=(12 * SIMULATION_HZ as u32) {
        app.update();

        if tick % SIMULATION_HZ as u32 == 0 {
            let world = app.world();
            let report: Vec<String> = npcs
                .iter()
                .filter_map(|npc| {
                    let health = world.get::<Health>(*npc)?;
                    let burning = world.get::<Burning>(*npc).is_some();
                    Some(format!(
                        "{:.1}{}",
                        health.current,
                        if burning { "🔥" } else { "" }
                    ))
                })
                .collect();
            println!("t={}s health: [{}]", tick / SIMULATION_HZ as u32, report.join(", "));
        }
    }

    println!("Simulation complete!");
}

fn setup_scenario(world: &mut World) -> Result<(Entity, Vec<Entity>), ConfigError> {
    let positions: Vec<Vec3> = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..NPC_COUNT)
            .map(|_| rng.point_in_ring(Vec3::ZERO, 1.0, 14.0))
            .collect()
    };

    let catalog = world.resource::<EffectCatalog>().clone();
    let (fireball, npcs) = {
        let mut commands = world.commands();

        let player = spawn_player(&mut commands, Vec3::new(0.0, 0.0, -3.0));
        let npcs: Vec<Entity> = positions
            .into_iter()
            .map(|position| spawn_character(&mut commands, position, 100.0))
            .collect();

        let fireball = spawn_explosive_item(
            &mut commands,
            &catalog,
            &ItemModules::fireball(),
            Transform::from_xyz(0.0, 0.5, 0.0),
            Some(player),
        )?;

        (fireball, npcs)
    };

    world.flush();
    Ok((fireball, npcs))
}
