//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - runner: состояние игрока (Runner, ForwardMotion, RunnerBody, SlideState, ColliderProfile, Health)
//! - obstacle: дескрипторы препятствий (Obstacle, EffectKind)

pub mod obstacle;
pub mod runner;

// Re-exports для удобного импорта
pub use obstacle::*;
pub use runner::*;
