//! Runner motion controller
//!
//! ECS ответственность:
//! - Состояние: lane, forward speed, grounded, slide, collider profile, health
//! - Переходы: intents (lane/jump/slide) + контакты от интегратора
//!
//! Host ответственность:
//! - Rigid-body интеграция и контакты (здесь headless stub с полом на y=0)
//! - Input polling (сюда приходят уже классифицированные события)

use bevy::prelude::*;

pub mod events;
pub mod locomotion;
pub mod maneuvers;

// Re-export основных типов
pub use events::{GroundContact, JumpIntent, LaneChangeIntent, SlideIntent};
pub use locomotion::{compute_step_motion, ease_toward};
pub use maneuvers::change_lane;

use crate::components::{ColliderProfile, ForwardMotion, Health, Runner, RunnerBody, SlideState};
use crate::config::RunnerConfig;
use crate::SimulationSet;

/// Runner Plugin
///
/// Порядок выполнения (FixedUpdate, chain):
/// 1. intents: lane → jump → slide
/// 2. advance_slide_state — slide-таймер + collider reset
/// 3. accelerate_forward
/// 4. apply_gravity, затем apply_fast_fall (fast fall перекрывает гравитацию)
/// 5. integrate_runner_motion
/// 6. ground_plane_contacts → apply_ground_contacts
pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<LaneChangeIntent>()
            .add_event::<JumpIntent>()
            .add_event::<SlideIntent>()
            .add_event::<GroundContact>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                maneuvers::apply_lane_change_intents,
                maneuvers::apply_jump_intents,
                maneuvers::apply_slide_intents,
                maneuvers::advance_slide_state,
                locomotion::accelerate_forward,
                locomotion::apply_gravity,
                maneuvers::apply_fast_fall,
                locomotion::integrate_runner_motion,
                locomotion::ground_plane_contacts,
                locomotion::apply_ground_contacts,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Locomotion),
        );
    }
}

/// Bundle runner'а с конфигурационными стартовыми значениями
///
/// lane = 0 (центр), grounded, standing коллайдер, полное здоровье.
pub fn runner_bundle(config: &RunnerConfig) -> impl Bundle {
    (
        Runner { lane: 0 },
        ForwardMotion {
            speed: config.start_forward_speed,
        },
        RunnerBody::default(),
        SlideState::default(),
        ColliderProfile::from(config.standing_profile),
        Health::new(config.max_health),
        Transform::from_translation(Vec3::ZERO),
    )
}

/// Spawn helper для создания runner'а
pub fn spawn_runner(commands: &mut Commands, config: &RunnerConfig) -> Entity {
    commands.spawn(runner_bundle(config)).id()
}
