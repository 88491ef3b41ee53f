//! Tile-end поверхность
//!
//! Генерация уровня живёт у level collaborator'а; ядро несёт только
//! контракт "runner добежал до конца тайла": запрос следующего тайла
//! наружу + отложенный деспавн отработавшего тайла.

use bevy::prelude::*;

use crate::collision::DespawnAfter;
use crate::components::Runner;
use crate::SimulationSet;

/// Trigger конца тайла (вешает level collaborator при размещении)
#[derive(Component, Debug, Clone, Copy)]
pub struct TileEnd {
    /// Задержка деспавна тайла после прохождения (сек)
    pub despawn_delay: f32,
}

impl Default for TileEnd {
    fn default() -> Self {
        Self { despawn_delay: 1.5 }
    }
}

/// Event: runner пересёк trigger конца тайла (от host интегратора)
#[derive(Event, Debug, Clone)]
pub struct TileEndContact {
    pub tile: Entity,
    pub runner: Entity,
}

/// Event: запрос спавна следующего тайла (потребляет level collaborator)
#[derive(Event, Debug, Clone)]
pub struct SpawnNextTileRequest;

/// Система: обработка tile-end контактов
///
/// Контакт не-runner'а игнорируется. Тайл получает DespawnAfter и
/// доигрывает despawn_delay, пока runner уже на следующем тайле.
pub fn handle_tile_end_contacts(
    mut commands: Commands,
    mut contacts: EventReader<TileEndContact>,
    mut requests: EventWriter<SpawnNextTileRequest>,
    tiles: Query<&TileEnd>,
    runners: Query<(), With<Runner>>,
) {
    for contact in contacts.read() {
        if runners.get(contact.runner).is_err() {
            continue;
        }
        let Ok(tile_end) = tiles.get(contact.tile) else {
            continue;
        };

        requests.send(SpawnNextTileRequest);
        if let Ok(mut tile_commands) = commands.get_entity(contact.tile) {
            tile_commands.insert(DespawnAfter {
                remaining: tile_end.despawn_delay,
            });
        }
    }
}

/// Tiles Plugin: tile-end контракт
pub struct TilesPlugin;

impl Plugin for TilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileEndContact>()
            .add_event::<SpawnNextTileRequest>();

        app.add_systems(
            FixedUpdate,
            handle_tile_end_contacts.in_set(SimulationSet::Collision),
        );
    }
}
