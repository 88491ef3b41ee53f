//! Дескрипторы препятствий
//!
//! Типизированная замена tag-проверок: вместо "entity помечен как Obstacle"
//! каждое препятствие несёт иммутабельный дескриптор, прикреплённый при
//! размещении тайла. Вид препятствия (low/normal) после создания не меняется.

use bevy::prelude::*;

/// Вид визуального эффекта, который может запросить ядро
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum EffectKind {
    Explosion,
}

/// Дескриптор препятствия (read-only для resolver'а)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Obstacle {
    /// Низкое препятствие — проходится только в slide
    pub low: bool,
    /// Эффект при столкновении (None — без эффекта)
    pub effect: Option<EffectKind>,
    /// Задержка до level reset после Damaged исхода (сек)
    pub recovery_delay: f32,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            low: false,
            effect: None,
            recovery_delay: 2.0,
        }
    }
}

impl Obstacle {
    pub fn low_with_effect(effect: EffectKind) -> Self {
        Self {
            low: true,
            effect: Some(effect),
            ..Default::default()
        }
    }
}
