//! LANERUN Simulation Core
//!
//! ECS-симуляция endless runner'а на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (lane/jump/slide state machine, collision rules, health)
//! - Host engine = tactical layer (rigid-body integration, rendering, input polling)
//!
//! Host общается с ядром только через события: intents внутрь
//! (LaneChangeIntent, JumpIntent, SlideIntent, SwipeInput), контакты внутрь
//! (GroundContact, ObstacleContact, TileEndContact), запросы наружу
//! (EffectSpawnRequest, LevelResetRequest, SpawnNextTileRequest).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod collision;
pub mod components;
pub mod config;
pub mod input;
pub mod logger;
pub mod runner;
pub mod tiles;

// Re-export базовых типов для удобства
pub use collision::{
    obstacle_bundle, resolve_collision, spawn_obstacle, CollisionOutcome, CollisionPlugin,
    CollisionResolved, DamageDealt, DamageInflicted, Dead, DespawnAfter, EffectSpawnRequest,
    LevelResetRequest, ObstacleContact, ResetTimer, RunnerDied,
};
pub use components::*;
pub use config::{ColliderShape, RunnerConfig};
pub use input::{classify_swipe, InputPlugin, SwipeAction, SwipeInput};
pub use runner::{
    runner_bundle, spawn_runner, GroundContact, JumpIntent, LaneChangeIntent, RunnerPlugin,
    SlideIntent,
};
pub use tiles::{SpawnNextTileRequest, TileEnd, TileEndContact, TilesPlugin};

/// Порядок фаз одного fixed тика: локомоция → разрешение коллизий → таймеры
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Locomotion,
    Collision,
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Tuning параметры (host может перезаписать до старта)
            .init_resource::<RunnerConfig>()
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Locomotion,
                    SimulationSet::Collision,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((RunnerPlugin, CollisionPlugin, TilesPlugin, InputPlugin));
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
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Прогоняет ровно один детерминированный тик симуляции.
///
/// Variable-rate фаза (Update: swipe mapping) + один fixed тик (FixedUpdate).
/// Время продвигаем вручную на timestep — прогон не зависит от wall clock,
/// в отличие от app.update(), где количество fixed тиков диктуют реальные часы.
pub fn step_simulation(app: &mut App) {
    app.world_mut().run_schedule(Update);

    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(timestep);

    app.world_mut().run_schedule(FixedUpdate);
}

/// Прогоняет n fixed тиков подряд
pub fn run_ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        step_simulation(app);
    }
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия: Debug-сериализация одного типа компонентов)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
