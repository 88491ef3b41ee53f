//! Headless симуляция LANERUN
//!
//! Запускает Bevy App без рендера: seeded obstacle course, скриптованные
//! swipes, грубое обнаружение контактов вместо host интегратора.

use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use lanerun_simulation::logger;
use lanerun_simulation::{
    create_headless_app, obstacle_bundle, runner_bundle, step_simulation, DeterministicRng,
    EffectKind, ForwardMotion, Health, Obstacle, ObstacleContact, Runner, RunnerConfig,
    SimulationPlugin, SwipeInput,
};

fn main() {
    let seed = 42;
    logger::init_logger();
    logger::log_info(&format!(
        "Starting LANERUN headless simulation (seed: {})",
        seed
    ));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let config = app.world().resource::<RunnerConfig>().clone();
    let runner = app.world_mut().spawn(runner_bundle(&config)).id();

    spawn_demo_course(app.world_mut(), &config);

    let mut contacted: HashSet<Entity> = HashSet::new();

    // 3600 тиков = 60 секунд при 60Hz
    for tick in 0..3600 {
        // Host stand-in: случайный swipe каждые 2 секунды
        if tick > 0 && tick % 120 == 0 {
            let delta = random_swipe_delta(app.world_mut());
            app.world_mut().send_event(SwipeInput {
                entity: runner,
                delta,
            });
        }

        // Host stand-in: грубое обнаружение контактов с препятствиями
        emit_demo_contacts(app.world_mut(), runner, &mut contacted);

        step_simulation(&mut app);

        if tick % 300 == 0 {
            report_progress(&mut app, runner, tick);
        }

        let alive = app
            .world()
            .get::<Health>(runner)
            .map(|h| h.is_alive())
            .unwrap_or(false);
        if !alive {
            logger::log_info(&format!("Runner died at tick {}", tick));
            break;
        }
    }

    logger::log_info("Simulation complete!");
}

/// Seeded трасса: 30 препятствий с шагом 8м, вид и lane из DeterministicRng
fn spawn_demo_course(world: &mut World, config: &RunnerConfig) {
    let specs: Vec<(i32, bool, f32)> = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..30)
            .map(|i| {
                let lane = rng.rng.gen_range(-1..=1);
                let low = rng.rng.gen_bool(0.4);
                (lane, low, 15.0 + i as f32 * 8.0)
            })
            .collect()
    };

    for (lane, low, z) in specs {
        let descriptor = Obstacle {
            low,
            effect: if low { None } else { Some(EffectKind::Explosion) },
            recovery_delay: 2.0,
        };
        let position = Vec3::new(lane as f32 * config.lane_offset, 0.0, z);
        world.spawn(obstacle_bundle(descriptor, position));
    }
}

fn random_swipe_delta(world: &mut World) -> Vec2 {
    let mut rng = world.resource_mut::<DeterministicRng>();
    match rng.rng.gen_range(0..4) {
        0 => Vec2::new(-1.0, 0.0), // lane left
        1 => Vec2::new(1.0, 0.0),  // lane right
        2 => Vec2::new(0.0, 1.0),  // jump
        _ => Vec2::new(0.0, -1.0), // slide
    }
}

/// Контакт: пересечение по z/x и по высоте (перепрыгнутое препятствие
/// контакта не даёт — это геометрия host'а, здесь её грубая замена)
fn emit_demo_contacts(world: &mut World, runner: Entity, contacted: &mut HashSet<Entity>) {
    let Some(runner_pos) = world.get::<Transform>(runner).map(|t| t.translation) else {
        return;
    };

    let mut obstacles = world.query::<(Entity, &Obstacle, &Transform)>();
    let hits: Vec<Entity> = obstacles
        .iter(world)
        .filter(|(entity, obstacle, transform)| {
            if contacted.contains(entity) {
                return false;
            }
            let top = if obstacle.low { 0.5 } else { 2.0 };
            (transform.translation.z - runner_pos.z).abs() <= 0.5
                && (transform.translation.x - runner_pos.x).abs() <= 0.8
                && runner_pos.y < top
        })
        .map(|(entity, _, _)| entity)
        .collect();

    for obstacle in hits {
        contacted.insert(obstacle);
        world.send_event(ObstacleContact { obstacle, runner });
    }
}

fn report_progress(app: &mut App, runner: Entity, tick: usize) {
    let world = app.world();
    let speed = world.get::<ForwardMotion>(runner).map(|m| m.speed);
    let lane = world.get::<Runner>(runner).map(|r| r.lane);
    let health = world.get::<Health>(runner).map(|h| h.current);
    let z = world.get::<Transform>(runner).map(|t| t.translation.z);

    logger::log_info(&format!(
        "Tick {}: z={:?} speed={:?} lane={:?} health={:?}",
        tick, z, speed, lane, health
    ));
}
