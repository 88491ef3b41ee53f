//! Damage pipeline и смерть runner'а
//!
//! Обрабатывает DamageInflicted события и применяет урон к Health.
//! Смерть — обычный state transition с явным сигналом, не exception:
//! RunnerDied стреляет ровно один раз, дальше runner инертен.

use bevy::prelude::*;

use crate::components::{ForwardMotion, Health, RunnerBody};
use crate::logger;

/// Event: resolver → damage система (единственный писатель Health)
#[derive(Event, Debug, Clone)]
pub struct DamageInflicted {
    pub target: Entity,
    pub amount: u32,
}

/// Event: урон нанесён
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub target: Entity,
    pub amount: u32,
    pub target_died: bool,
}

/// Event: runner умер (health == 0), ровно один раз за жизнь entity
#[derive(Event, Debug, Clone)]
pub struct RunnerDied {
    pub entity: Entity,
}

/// Компонент-маркер: runner мёртв
///
/// Исключает entity из intent/locomotion/collision систем.
/// Деспавн не автоматический — host решает, что показывать дальше.
#[derive(Component, Debug)]
pub struct Dead;

/// Отложенный level reset (после Damaged исхода)
///
/// Отдельная entity-таймер: переживает смерть runner'а, по истечении
/// эмитит LevelResetRequest и деспавнится.
#[derive(Component, Debug, Clone, Copy)]
pub struct ResetTimer {
    pub remaining: f32,
}

/// Event: пора перезапускать уровень (потребляет level collaborator)
#[derive(Event, Debug, Clone)]
pub struct LevelResetRequest;

/// Generic отложенный деспавн (эффекты, отработавшие тайлы)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub remaining: f32,
}

/// Система: применение урона
///
/// 1. Читаем DamageInflicted
/// 2. Мёртвая цель — no-op (terminal): health остаётся 0, сигнал не повторяется
/// 3. Применяем урон, эмитим DamageDealt и (на переходе alive → dead) RunnerDied
pub fn apply_damage(
    mut inflicted: EventReader<DamageInflicted>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<RunnerDied>,
    mut targets: Query<&mut Health>,
) {
    for event in inflicted.read() {
        let Ok(mut health) = targets.get_mut(event.target) else {
            logger::log_warning(&format!(
                "DamageInflicted: target {:?} has no Health component",
                event.target
            ));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        health.take_damage(event.amount);
        let target_died = !health.is_alive();

        logger::log_info(&format!(
            "Runner {:?} took {} damage, health: {}/{}",
            event.target, event.amount, health.current, health.max
        ));

        dealt.send(DamageDealt {
            target: event.target,
            amount: event.amount,
            target_died,
        });

        if target_died {
            died.send(RunnerDied {
                entity: event.target,
            });
            logger::log_info(&format!("Runner {:?} died", event.target));
        }
    }
}

/// Система: обездвиживание мёртвого runner'а
///
/// Гасим velocity и forward speed сразу (не через Commands), маркер Dead
/// вешаем через Commands — со следующего sync point runner выпадает из
/// всех Without<Dead> систем.
pub fn disable_runner_on_death(
    mut commands: Commands,
    mut death_events: EventReader<RunnerDied>,
    mut bodies: Query<(&mut RunnerBody, &mut ForwardMotion)>,
) {
    for event in death_events.read() {
        if let Ok((mut body, mut motion)) = bodies.get_mut(event.entity) {
            body.velocity = Vec3::ZERO;
            motion.speed = 0.0;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }
    }
}

/// Система: тик reset-таймеров
///
/// LevelResetRequest эмитится ровно один раз на таймер; подписчик может
/// отсутствовать (headless) — событие просто сгорит.
pub fn tick_reset_timers(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut resets: EventWriter<LevelResetRequest>,
    mut timers: Query<(Entity, &mut ResetTimer)>,
) {
    let dt = time.delta_secs();

    for (entity, mut timer) in timers.iter_mut() {
        timer.remaining -= dt;
        if timer.remaining <= 0.0 {
            resets.send(LevelResetRequest);
            logger::log_info("Collision recovery elapsed, requesting level reset");
            commands.entity(entity).despawn();
        }
    }
}

/// Система: generic отложенный деспавн
pub fn despawn_after_timeout(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut pending: Query<(Entity, &mut DespawnAfter)>,
) {
    let dt = time.delta_secs();

    for (entity, mut despawn) in pending.iter_mut() {
        despawn.remaining -= dt;
        if despawn.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_dealt_event() {
        let event = DamageDealt {
            target: Entity::PLACEHOLDER,
            amount: 1,
            target_died: false,
        };

        assert_eq!(event.amount, 1);
        assert!(!event.target_died);
    }

    #[test]
    fn test_reset_timer_countdown() {
        let mut timer = ResetTimer { remaining: 2.0 };
        let dt = 1.0 / 60.0;

        for _ in 0..119 {
            timer.remaining -= dt;
        }
        assert!(timer.remaining > 0.0);

        timer.remaining -= dt;
        timer.remaining -= dt;
        assert!(timer.remaining <= 0.0);
    }
}
