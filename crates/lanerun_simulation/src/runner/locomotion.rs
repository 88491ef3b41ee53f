//! Локомоция runner'а: forward ускорение, гравитация, интеграция движения
//!
//! Архитектура:
//! - Forward движение: speed·dt вдоль трека каждый fixed тик
//! - Lateral движение: easing к lane·lane_offset со скоростью dodge_speed,
//!   никогда не снапается — плавная смена lane на любом tick rate
//! - Вертикаль: custom velocity integration (прыжок/падение), host интегратор
//!   в реальной игре делает то же самое на своей стороне
//!
//! Детерминизм: fixed timestep 60Hz, системы в chain

use bevy::prelude::*;

use super::events::GroundContact;
use crate::collision::Dead;
use crate::components::{ForwardMotion, Runner, RunnerBody};
use crate::config::RunnerConfig;

/// Шаг движения за тик: (forward displacement, lateral target X)
///
/// Чистая функция без side effects — безопасна на любой частоте вызова.
pub fn compute_step_motion(forward_speed: f32, lane: i32, lane_offset: f32, dt: f32) -> (f32, f32) {
    (forward_speed * dt, lane as f32 * lane_offset)
}

/// Easing к target со скоростью rate; шаг зажат, чтобы не перелетать цель
pub fn ease_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let alpha = (rate * dt).min(1.0);
    current + (target - current) * alpha
}

/// Система: forward ускорение к max_forward_speed
pub fn accelerate_forward(
    config: Res<RunnerConfig>,
    time: Res<Time<Fixed>>,
    mut runners: Query<&mut ForwardMotion, (With<Runner>, Without<Dead>)>,
) {
    let dt = time.delta_secs();

    for mut motion in runners.iter_mut() {
        motion.accelerate(config.acceleration, config.max_forward_speed, dt);
    }
}

/// Система: гравитация, только в воздухе
pub fn apply_gravity(
    config: Res<RunnerConfig>,
    time: Res<Time<Fixed>>,
    mut runners: Query<&mut RunnerBody, (With<Runner>, Without<Dead>)>,
) {
    let dt = time.delta_secs();

    for mut body in runners.iter_mut() {
        if !body.grounded {
            body.velocity.y += config.gravity * dt;
        }
    }
}

/// Система: интеграция velocity/lane → Transform
pub fn integrate_runner_motion(
    config: Res<RunnerConfig>,
    time: Res<Time<Fixed>>,
    mut runners: Query<(&Runner, &ForwardMotion, &RunnerBody, &mut Transform), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for (runner, motion, body, mut transform) in runners.iter_mut() {
        let (forward_delta, lateral_target) =
            compute_step_motion(motion.speed, runner.lane, config.lane_offset, dt);

        transform.translation.z += forward_delta;
        transform.translation.x = ease_toward(
            transform.translation.x,
            lateral_target,
            config.dodge_speed,
            dt,
        );
        transform.translation.y += body.velocity.y * dt;
    }
}

/// Система: ground plane stub для headless режима
///
/// Host интегратор в реальной игре репортит контакты сам; здесь пол на y=0:
/// пересекли его при падении — клампим, гасим вертикальную скорость и
/// эмитим GroundContact с нормалью +Y.
pub fn ground_plane_contacts(
    mut contacts: EventWriter<GroundContact>,
    mut runners: Query<(Entity, &mut Transform, &mut RunnerBody), (With<Runner>, Without<Dead>)>,
) {
    for (entity, mut transform, mut body) in runners.iter_mut() {
        if transform.translation.y <= 0.0 && body.velocity.y < 0.0 {
            transform.translation.y = 0.0;
            body.velocity.y = 0.0;
            contacts.send(GroundContact {
                entity,
                normal: Vec3::Y,
            });
        }
    }
}

/// Система: восстановление grounded по контактам
///
/// grounded = true строго при normal == +Y; контакт со стеной/боком
/// препятствия флаг не трогает.
pub fn apply_ground_contacts(
    mut contacts: EventReader<GroundContact>,
    mut runners: Query<&mut RunnerBody, Without<Dead>>,
) {
    for contact in contacts.read() {
        let Ok(mut body) = runners.get_mut(contact.entity) else {
            continue;
        };
        if contact.normal == Vec3::Y {
            body.grounded = true;
        }
    }
}
