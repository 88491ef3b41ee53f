//! Runner events
//!
//! Intents генерирует input-слой (swipe mapper или host напрямую),
//! контакты репортит внешний rigid-body интегратор.

use bevy::prelude::*;

/// Event: смена lane
///
/// direction ∈ {-1, +1}; на крайнем lane лишнее нажатие — no-op, не ошибка.
#[derive(Event, Debug, Clone)]
pub struct LaneChangeIntent {
    pub entity: Entity,
    pub direction: i32,
}

/// Event: намерение прыгнуть (jump intent)
///
/// Обрабатывается только когда runner grounded и не в slide.
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Event: намерение уйти в slide
///
/// Повторный slide во время активного перезапускает таймер.
#[derive(Event, Debug, Clone)]
pub struct SlideIntent {
    pub entity: Entity,
}

/// Event: контакт с поверхностью (от host интегратора или headless stub)
///
/// grounded восстанавливается только если normal строго равна +Y.
#[derive(Event, Debug, Clone)]
pub struct GroundContact {
    pub entity: Entity,
    pub normal: Vec3,
}
