//! Манёвры runner'а: смена lane, прыжок, slide
//!
//! Состояния ортогональны:
//! - вертикаль: Grounded ↔ Airborne (Jump / GroundContact)
//! - slide: Standing ↔ Sliding (SlideIntent / slide-таймер, через
//!   транзитное "collider reset" подсостояние)
//! - жизнь: Alive → Dead (one-way, в collision модуле)
//!
//! Все "невалидные" входы — no-op: прыжок в воздухе или в slide,
//! смена lane за границу, slide во время slide (рестарт таймера).

use bevy::prelude::*;

use super::events::{JumpIntent, LaneChangeIntent, SlideIntent};
use crate::collision::Dead;
use crate::components::{ColliderProfile, Runner, RunnerBody, SlideState};
use crate::config::RunnerConfig;

/// lane' = clamp(lane + direction, -1, 1)
pub fn change_lane(lane: i32, direction: i32) -> i32 {
    (lane + direction.signum()).clamp(-1, 1)
}

/// Система: смена lane по intents
pub fn apply_lane_change_intents(
    mut intents: EventReader<LaneChangeIntent>,
    mut runners: Query<&mut Runner, Without<Dead>>,
) {
    for intent in intents.read() {
        let Ok(mut runner) = runners.get_mut(intent.entity) else {
            continue;
        };
        runner.lane = change_lane(runner.lane, intent.direction);
    }
}

/// Система: прыжок
///
/// Только grounded и не в slide; иначе intent молча игнорируется.
pub fn apply_jump_intents(
    config: Res<RunnerConfig>,
    mut intents: EventReader<JumpIntent>,
    mut runners: Query<(&mut RunnerBody, &SlideState), Without<Dead>>,
) {
    for intent in intents.read() {
        let Ok((mut body, slide)) = runners.get_mut(intent.entity) else {
            continue;
        };
        if body.grounded && !slide.sliding {
            body.velocity.y += config.jump_force; // импульс
            body.grounded = false;
        }
    }
}

/// Система: вход в slide / рестарт таймера
///
/// Коллайдер ужимается мгновенно (единственный не-интерполированный переход);
/// в воздухе дополнительно форсируется быстрое снижение.
pub fn apply_slide_intents(
    config: Res<RunnerConfig>,
    mut intents: EventReader<SlideIntent>,
    mut runners: Query<(&mut SlideState, &mut ColliderProfile, &mut RunnerBody), Without<Dead>>,
) {
    for intent in intents.read() {
        let Ok((mut slide, mut profile, mut body)) = runners.get_mut(intent.entity) else {
            continue;
        };
        slide.begin(config.slide_duration);
        profile.set(config.sliding_profile);
        if !body.grounded {
            body.velocity.y = -config.fast_fall_speed;
        }
    }
}

/// Система: тик slide-таймера и collider-reset интерполяции
pub fn advance_slide_state(
    config: Res<RunnerConfig>,
    time: Res<Time<Fixed>>,
    mut runners: Query<(&mut SlideState, &mut ColliderProfile), Without<Dead>>,
) {
    let dt = time.delta_secs();

    for (mut slide, mut profile) in runners.iter_mut() {
        slide.advance(
            &mut profile,
            config.standing_profile,
            config.collider_reset_duration,
            dt,
        );
    }
}

/// Система: форсированное снижение в airborne slide
///
/// Применяется каждый fixed тик пока sliding ∧ ¬grounded (не только на входе
/// в slide), до первого GroundContact.
pub fn apply_fast_fall(
    config: Res<RunnerConfig>,
    mut runners: Query<(&SlideState, &mut RunnerBody), Without<Dead>>,
) {
    for (slide, mut body) in runners.iter_mut() {
        if slide.sliding && !body.grounded {
            body.velocity.y = -config.fast_fall_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_change_lane_clamps_at_bounds() {
        assert_eq!(change_lane(0, 1), 1);
        assert_eq!(change_lane(1, 1), 1); // no-op на краю
        assert_eq!(change_lane(0, -1), -1);
        assert_eq!(change_lane(-1, -1), -1);
        assert_eq!(change_lane(-1, 1), 0);
    }

    #[test]
    fn test_change_lane_random_walk_stays_in_bounds() {
        // Случайная последовательность: lane всегда в {-1, 0, 1} и равен
        // пошаговому клампу суммы направлений
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut lane = 0;
        let mut expected = 0i32;

        for _ in 0..1000 {
            let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
            lane = change_lane(lane, direction);
            expected = (expected + direction).clamp(-1, 1);
            assert_eq!(lane, expected);
            assert!((-1..=1).contains(&lane));
        }
    }
}
