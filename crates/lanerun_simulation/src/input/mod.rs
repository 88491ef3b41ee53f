//! Swipe gesture mapper
//!
//! События генерируются из host Input API (touch delta между began/ended)
//! и классифицируются в дискретные intents для runner'а.
//!
//! Классификация — чистая функция: (Δ, threshold) → Action ∪ None.

use bevy::prelude::*;

use crate::config::RunnerConfig;
use crate::runner::{JumpIntent, LaneChangeIntent, SlideIntent};

/// Дискретное действие, распознанное из жеста
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    LaneLeft,
    LaneRight,
    Jump,
    Slide,
}

/// Event: сырой swipe delta от host input-слоя
///
/// delta уже в device-independent units (host делит пиксели на dpi).
#[derive(Event, Debug, Clone, Copy)]
pub struct SwipeInput {
    pub entity: Entity,
    pub delta: Vec2,
}

/// Классификация жеста
///
/// Горизонтальный: |Δx| > |Δy| и |Δx| ≥ threshold → lane по знаку Δx.
/// Иначе вертикальный: Δy ≥ threshold → Jump, Δy ≤ -threshold → Slide.
/// Под-пороговый жест в обеих осях → None.
pub fn classify_swipe(delta: Vec2, min_distance: f32) -> Option<SwipeAction> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x.abs() >= min_distance {
            if delta.x > 0.0 {
                Some(SwipeAction::LaneRight)
            } else {
                Some(SwipeAction::LaneLeft)
            }
        } else {
            None
        }
    } else if delta.y >= min_distance {
        Some(SwipeAction::Jump)
    } else if delta.y <= -min_distance {
        Some(SwipeAction::Slide)
    } else {
        None
    }
}

/// Порог жеста в пикселях для конкретного экрана
pub fn swipe_threshold_pixels(min_distance_units: f32, dpi: f32) -> f32 {
    min_distance_units * dpi
}

/// Система: swipe → intent events (Update, variable-rate фаза)
pub fn map_swipe_input(
    config: Res<RunnerConfig>,
    mut swipes: EventReader<SwipeInput>,
    mut lane_intents: EventWriter<LaneChangeIntent>,
    mut jump_intents: EventWriter<JumpIntent>,
    mut slide_intents: EventWriter<SlideIntent>,
) {
    for swipe in swipes.read() {
        match classify_swipe(swipe.delta, config.min_swipe_distance) {
            Some(SwipeAction::LaneLeft) => {
                lane_intents.send(LaneChangeIntent {
                    entity: swipe.entity,
                    direction: -1,
                });
            }
            Some(SwipeAction::LaneRight) => {
                lane_intents.send(LaneChangeIntent {
                    entity: swipe.entity,
                    direction: 1,
                });
            }
            Some(SwipeAction::Jump) => {
                jump_intents.send(JumpIntent {
                    entity: swipe.entity,
                });
            }
            Some(SwipeAction::Slide) => {
                slide_intents.send(SlideIntent {
                    entity: swipe.entity,
                });
            }
            None => {}
        }
    }
}

/// Input Plugin: swipe события + mapping в Update
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SwipeInput>();
        app.add_systems(Update, map_swipe_input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.25;

    #[test]
    fn test_horizontal_swipes() {
        assert_eq!(
            classify_swipe(Vec2::new(0.5, 0.1), THRESHOLD),
            Some(SwipeAction::LaneRight)
        );
        assert_eq!(
            classify_swipe(Vec2::new(-0.5, 0.1), THRESHOLD),
            Some(SwipeAction::LaneLeft)
        );
    }

    #[test]
    fn test_vertical_swipes() {
        assert_eq!(
            classify_swipe(Vec2::new(0.1, 0.5), THRESHOLD),
            Some(SwipeAction::Jump)
        );
        assert_eq!(
            classify_swipe(Vec2::new(0.1, -0.5), THRESHOLD),
            Some(SwipeAction::Slide)
        );
    }

    #[test]
    fn test_below_threshold_is_none() {
        assert_eq!(classify_swipe(Vec2::new(0.2, 0.1), THRESHOLD), None);
        assert_eq!(classify_swipe(Vec2::new(0.1, -0.2), THRESHOLD), None);
        assert_eq!(classify_swipe(Vec2::ZERO, THRESHOLD), None);
    }

    #[test]
    fn test_diagonal_tie_goes_vertical() {
        // |Δx| == |Δy| — не строго больше, уходит в вертикальную ветку
        assert_eq!(
            classify_swipe(Vec2::new(0.5, 0.5), THRESHOLD),
            Some(SwipeAction::Jump)
        );
        assert_eq!(
            classify_swipe(Vec2::new(0.5, -0.5), THRESHOLD),
            Some(SwipeAction::Slide)
        );
    }

    #[test]
    fn test_threshold_pixels() {
        assert_eq!(swipe_threshold_pixels(0.25, 320.0), 80.0);
    }
}
