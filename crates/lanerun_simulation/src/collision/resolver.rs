//! Разрешение контактов с препятствиями
//!
//! Контакт приходит от host интегратора как ObstacleContact; исход зависит
//! только от вида препятствия и slide-состояния runner'а в момент удара.
//! Единственная запись в состояние игрока — DamageInflicted (single-writer
//! инвариант: Health мутирует только apply_damage).

use bevy::prelude::*;

use super::damage::{DamageInflicted, ResetTimer};
use crate::components::{EffectKind, Health, Obstacle, Runner, SlideState};
use crate::logger;

/// Event: контакт runner ↔ препятствие (от host интегратора или теста)
#[derive(Event, Debug, Clone)]
pub struct ObstacleContact {
    pub obstacle: Entity,
    pub runner: Entity,
}

/// Исход контакта с препятствием
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Низкое препятствие пройдено в slide
    Avoided,
    /// Урон + эффект + отложенный level reset
    Damaged,
}

/// Event: вердикт resolver'а (для HUD, звука, статистики)
#[derive(Event, Debug, Clone)]
pub struct CollisionResolved {
    pub runner: Entity,
    pub obstacle: Entity,
    pub outcome: CollisionOutcome,
}

/// Event: запрос визуального эффекта (fire-and-forget)
///
/// Рендер-слой может отсутствовать (headless) — событие просто никто не
/// прочитает, это не ошибка.
#[derive(Event, Debug, Clone)]
pub struct EffectSpawnRequest {
    pub kind: EffectKind,
    pub position: Vec3,
}

/// Вердикт по таблице исходов
///
/// Avoided ⇔ low ∧ sliding. Airborne сам по себе ничего не даёт:
/// прыжок над низким препятствием без slide — всё равно Damaged.
pub fn resolve_collision(obstacle: &Obstacle, sliding: bool) -> CollisionOutcome {
    if obstacle.low && sliding {
        CollisionOutcome::Avoided
    } else {
        CollisionOutcome::Damaged
    }
}

/// Система: обработка ObstacleContact событий
///
/// 1. Читаем контакт, достаём дескриптор и slide-состояние
/// 2. resolve_collision → вердикт
/// 3. Damaged: эффект (если настроен) + урон 1 + ResetTimer на recovery_delay
pub fn resolve_obstacle_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ObstacleContact>,
    mut resolved: EventWriter<CollisionResolved>,
    mut damage: EventWriter<DamageInflicted>,
    mut effects: EventWriter<EffectSpawnRequest>,
    obstacles: Query<(&Obstacle, &Transform)>,
    runners: Query<(&SlideState, &Health), With<Runner>>,
) {
    for contact in contacts.read() {
        let Ok((obstacle, obstacle_transform)) = obstacles.get(contact.obstacle) else {
            logger::log_warning(&format!(
                "ObstacleContact: {:?} has no Obstacle descriptor",
                contact.obstacle
            ));
            continue;
        };
        let Ok((slide, health)) = runners.get(contact.runner) else {
            continue;
        };

        // Мёртвый runner инертен — контакты игнорируем
        if !health.is_alive() {
            continue;
        }

        let outcome = resolve_collision(obstacle, slide.sliding);
        resolved.send(CollisionResolved {
            runner: contact.runner,
            obstacle: contact.obstacle,
            outcome,
        });

        match outcome {
            CollisionOutcome::Avoided => {
                logger::log("Runner slid under a low obstacle");
            }
            CollisionOutcome::Damaged => {
                if let Some(kind) = obstacle.effect {
                    effects.send(EffectSpawnRequest {
                        kind,
                        position: obstacle_transform.translation,
                    });
                }
                damage.send(DamageInflicted {
                    target: contact.runner,
                    amount: 1,
                });
                commands.spawn(ResetTimer {
                    remaining: obstacle.recovery_delay,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(low: bool) -> Obstacle {
        Obstacle {
            low,
            ..Default::default()
        }
    }

    #[test]
    fn test_low_obstacle_avoided_only_while_sliding() {
        assert_eq!(
            resolve_collision(&obstacle(true), true),
            CollisionOutcome::Avoided
        );
        assert_eq!(
            resolve_collision(&obstacle(true), false),
            CollisionOutcome::Damaged
        );
    }

    #[test]
    fn test_normal_obstacle_always_damages() {
        assert_eq!(
            resolve_collision(&obstacle(false), true),
            CollisionOutcome::Damaged
        );
        assert_eq!(
            resolve_collision(&obstacle(false), false),
            CollisionOutcome::Damaged
        );
    }
}
