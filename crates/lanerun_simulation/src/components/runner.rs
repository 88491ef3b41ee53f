//! Компоненты runner'а: lane, forward скорость, kinematic body, slide, коллайдер, health

use bevy::prelude::*;

use crate::config::ColliderShape;

/// Runner (игрок) — маркер + lane index
///
/// Автоматически добавляет весь kinematic набор через Required Components:
/// entity с Runner не может существовать без body/коллайдера/health,
/// поэтому "геометрия не задана" исключена структурно.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(ForwardMotion, RunnerBody, SlideState, ColliderProfile, Health, Transform)]
pub struct Runner {
    /// Текущий lane: -1 = левый, 0 = центр, 1 = правый
    pub lane: i32,
}

/// Forward скорость: монотонно растёт к max, сбрасывается только при спавне
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ForwardMotion {
    pub speed: f32,
}

impl Default for ForwardMotion {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

impl ForwardMotion {
    /// speed = min(max, speed + acceleration·dt)
    pub fn accelerate(&mut self, acceleration: f32, max_speed: f32, dt: f32) {
        self.speed = (self.speed + acceleration * dt).min(max_speed);
    }
}

/// Kinematic состояние: вертикальная скорость + grounded флаг
///
/// grounded переключается только контактами: true ⇔ последний контакт
/// имел нормаль строго +Y (см. apply_ground_contacts).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RunnerBody {
    pub velocity: Vec3,
    pub grounded: bool,
}

impl Default for RunnerBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true, // спавнимся на земле
        }
    }
}

/// Активная интерполяция коллайдера обратно к standing форме
#[derive(Debug, Clone, Copy, Reflect)]
pub struct ColliderReset {
    pub elapsed: f32,
    pub from_height: f32,
    pub from_center: f32,
}

/// Slide-состояние: флаг, restart-таймер и незавершённый collider reset
///
/// Инвариант: прыжок запрещён пока sliding == true.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SlideState {
    pub sliding: bool,
    /// Остаток slide-таймера (сек)
    pub remaining: f32,
    pub reset: Option<ColliderReset>,
}

impl SlideState {
    /// Вход в slide или рестарт уже активного.
    ///
    /// Таймер перезапускается целиком (restart, не additive), незавершённая
    /// reset-интерполяция отменяется.
    pub fn begin(&mut self, duration: f32) {
        self.sliding = true;
        self.remaining = duration;
        self.reset = None;
    }

    /// Тик slide-таймера и reset-интерполяции.
    ///
    /// По истечении таймера slide заканчивается и стартует линейная
    /// интерполяция коллайдера к standing форме за reset_duration; в конце
    /// профиль попадает в standing значения точно, из любой начальной формы.
    pub fn advance(
        &mut self,
        profile: &mut ColliderProfile,
        standing: ColliderShape,
        reset_duration: f32,
        dt: f32,
    ) {
        if self.sliding {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.remaining = 0.0;
                self.sliding = false;
                self.reset = Some(ColliderReset {
                    elapsed: 0.0,
                    from_height: profile.height,
                    from_center: profile.center_y,
                });
            }
        } else if let Some(reset) = &mut self.reset {
            reset.elapsed += dt;
            let t = (reset.elapsed / reset_duration).min(1.0);
            profile.height = reset.from_height + (standing.height - reset.from_height) * t;
            profile.center_y = reset.from_center + (standing.center_y - reset.from_center) * t;
            if t >= 1.0 {
                // Точное попадание в standing, без float-хвоста от lerp
                profile.height = standing.height;
                profile.center_y = standing.center_y;
                self.reset = None;
            }
        }
    }
}

/// Текущая форма коллайдера игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ColliderProfile {
    pub height: f32,
    pub center_y: f32,
}

impl Default for ColliderProfile {
    fn default() -> Self {
        Self {
            height: 2.0,
            center_y: 1.0,
        }
    }
}

impl From<ColliderShape> for ColliderProfile {
    fn from(shape: ColliderShape) -> Self {
        Self {
            height: shape.height,
            center_y: shape.center_y,
        }
    }
}

impl ColliderProfile {
    pub fn set(&mut self, shape: ColliderShape) {
        self.height = shape.height;
        self.center_y = shape.center_y;
    }

    pub fn matches(&self, shape: ColliderShape) -> bool {
        self.height == shape.height && self.center_y == shape.center_y
    }
}

/// Здоровье runner'а
///
/// Инвариант: 0 ≤ current ≤ max; смерть (current == 0) необратима.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDING: ColliderShape = ColliderShape {
        height: 2.0,
        center_y: 1.0,
    };

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(3);
        assert_eq!(health.current, 3);

        health.take_damage(1);
        assert_eq!(health.current, 2);
        assert!(health.is_alive());

        health.take_damage(5); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_forward_motion_clamped_at_max() {
        let mut motion = ForwardMotion { speed: 19.99 };

        for _ in 0..100 {
            let before = motion.speed;
            motion.accelerate(0.05, 20.0, 1.0);
            assert!(motion.speed >= before); // монотонность
        }
        assert_eq!(motion.speed, 20.0);
    }

    #[test]
    fn test_slide_restart_resets_timer() {
        let mut slide = SlideState::default();
        let mut profile = ColliderProfile::from(STANDING);
        let dt = 1.0 / 60.0;

        slide.begin(1.0);
        for _ in 0..30 {
            slide.advance(&mut profile, STANDING, 0.2, dt);
        }
        assert!(slide.sliding);

        // Рестарт на полпути: таймер снова полный
        slide.begin(1.0);
        for _ in 0..45 {
            slide.advance(&mut profile, STANDING, 0.2, dt);
        }
        // 45 тиков с рестарта < 60 — всё ещё sliding (75 тиков с первого slide)
        assert!(slide.sliding);

        for _ in 0..20 {
            slide.advance(&mut profile, STANDING, 0.2, dt);
        }
        assert!(!slide.sliding);
    }

    #[test]
    fn test_collider_reset_converges_exactly() {
        let dt = 1.0 / 60.0;

        // Стартуем из произвольной промежуточной формы
        for start_height in [0.7, 1.0, 1.6] {
            let mut slide = SlideState {
                sliding: false,
                remaining: 0.0,
                reset: Some(ColliderReset {
                    elapsed: 0.0,
                    from_height: start_height,
                    from_center: start_height / 2.0,
                }),
            };
            let mut profile = ColliderProfile {
                height: start_height,
                center_y: start_height / 2.0,
            };

            let mut prev_height = profile.height;
            for _ in 0..20 {
                slide.advance(&mut profile, STANDING, 0.2, dt);
                assert!(profile.height >= prev_height); // монотонность
                prev_height = profile.height;
            }

            // Ровно standing значения, интерполяция завершена
            assert!(profile.matches(STANDING), "profile = {:?}", profile);
            assert!(slide.reset.is_none());
        }
    }

    #[test]
    fn test_slide_begin_cancels_reset() {
        let mut slide = SlideState {
            sliding: false,
            remaining: 0.0,
            reset: Some(ColliderReset {
                elapsed: 0.1,
                from_height: 1.0,
                from_center: 0.5,
            }),
        };

        slide.begin(1.0);
        assert!(slide.sliding);
        assert!(slide.reset.is_none());
        assert_eq!(slide.remaining, 1.0);
    }
}
