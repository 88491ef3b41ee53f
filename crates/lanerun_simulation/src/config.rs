//! Tuning параметры runner'а
//!
//! Один Resource со всеми константами движения/slide/health.
//! Host может перезаписать значения до старта симуляции
//! (или десериализовать из своего config-файла — serde derive).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Форма коллайдера: высота капсулы + Y-центр
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderShape {
    pub height: f32,
    pub center_y: f32,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Скорость горизонтального уворота (lane easing rate)
    pub dodge_speed: f32,
    /// Начальная forward скорость (m/s)
    pub start_forward_speed: f32,
    /// Максимальная forward скорость (m/s)
    pub max_forward_speed: f32,
    /// Forward ускорение (m/s за секунду)
    pub acceleration: f32,
    /// Импульс прыжка
    pub jump_force: f32,
    /// Гравитация (m/s²)
    pub gravity: f32,
    /// Расстояние между lane'ами (метры)
    pub lane_offset: f32,
    /// Минимальная длина swipe-жеста (device-independent units)
    pub min_swipe_distance: f32,
    /// Стартовое (и максимальное) здоровье
    pub max_health: u32,
    /// Длительность slide (сек); повторный slide перезапускает таймер
    pub slide_duration: f32,
    /// Принудительная скорость падения при slide в воздухе
    pub fast_fall_speed: f32,
    /// Длительность интерполяции коллайдера sliding → standing (сек)
    pub collider_reset_duration: f32,
    /// Коллайдер стоя
    pub standing_profile: ColliderShape,
    /// Коллайдер в slide (уменьшенная высота)
    pub sliding_profile: ColliderShape,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            dodge_speed: 5.0,
            start_forward_speed: 5.0,
            max_forward_speed: 20.0,
            acceleration: 0.05,
            jump_force: 5.0,
            gravity: -9.81,
            lane_offset: 2.0,
            min_swipe_distance: 0.25,
            max_health: 3,
            slide_duration: 1.0,
            fast_fall_speed: 10.0,
            collider_reset_duration: 0.2,
            standing_profile: ColliderShape {
                height: 2.0,
                center_y: 1.0,
            },
            sliding_profile: ColliderShape {
                height: 1.0,
                center_y: 0.5,
            },
        }
    }
}
