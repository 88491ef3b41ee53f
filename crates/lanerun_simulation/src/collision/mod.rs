//! Obstacle collision module
//!
//! ECS ответственность:
//! - Вердикт по контакту: Avoided / Damaged (таблица исходов)
//! - Damage pipeline: Health, DamageDealt, RunnerDied, Dead
//! - Отложенный level reset (ResetTimer) и generic деспавн (DespawnAfter)
//!
//! Host ответственность:
//! - Обнаружение контактов (сюда приходит готовый ObstacleContact)
//! - Сам визуальный эффект и фактический reset сцены

use bevy::prelude::*;

pub mod damage;
pub mod resolver;

// Re-export основных типов
pub use damage::{
    apply_damage, despawn_after_timeout, DamageDealt, DamageInflicted, Dead, DespawnAfter,
    LevelResetRequest, ResetTimer, RunnerDied,
};
pub use resolver::{
    resolve_collision, CollisionOutcome, CollisionResolved, EffectSpawnRequest, ObstacleContact,
};

use crate::components::Obstacle;
use crate::SimulationSet;

/// Collision Plugin
///
/// Порядок выполнения (FixedUpdate, chain):
/// 1. resolve_obstacle_contacts — контакт → вердикт → урон/эффект/ResetTimer
/// 2. apply_damage — Health + DamageDealt + RunnerDied
/// 3. disable_runner_on_death
/// 4. таймеры (Cleanup set): tick_reset_timers, despawn_after_timeout
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ObstacleContact>()
            .add_event::<CollisionResolved>()
            .add_event::<EffectSpawnRequest>()
            .add_event::<DamageInflicted>()
            .add_event::<DamageDealt>()
            .add_event::<RunnerDied>()
            .add_event::<LevelResetRequest>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                resolver::resolve_obstacle_contacts,
                damage::apply_damage,
                damage::disable_runner_on_death,
            )
                .chain()
                .in_set(SimulationSet::Collision),
        );

        app.add_systems(
            FixedUpdate,
            (damage::tick_reset_timers, damage::despawn_after_timeout)
                .chain()
                .in_set(SimulationSet::Cleanup),
        );
    }
}

/// Bundle препятствия: дескриптор + позиция
pub fn obstacle_bundle(descriptor: Obstacle, position: Vec3) -> impl Bundle {
    (descriptor, Transform::from_translation(position))
}

/// Spawn helper для размещения препятствия
pub fn spawn_obstacle(commands: &mut Commands, descriptor: Obstacle, position: Vec3) -> Entity {
    commands.spawn(obstacle_bundle(descriptor, position)).id()
}
