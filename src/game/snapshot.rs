use itertools::Itertools;
use serde::Serialize;

use crate::board::Meeple;
use crate::catalog::TileId;
use crate::coords::Coordinate;
use crate::game::players::PlayerId;
use crate::game::state::{Game, TurnPhase};
use crate::structures::ClaimSpot;
use crate::types::Rotation;

/// Read-only projection of a game for the transport layer. Pure; safe to
/// build after every command, successful or not.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: PhaseSnapshot,
    pub cells: Vec<CellSnapshot>,
    pub players: Vec<PlayerSnapshot>,
    pub tiles_remaining: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PhaseSnapshot {
    NotStarted,
    DrawTile,
    PlayTile {
        tile: TileId,
        rotation: u16,
        coords: Vec<Coordinate>,
    },
    PlaceMeeple {
        coord: Coordinate,
        claimable: Vec<ClaimSpot>,
    },
    Ended,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellSnapshot {
    pub tile: TileId,
    pub coord: Coordinate,
    pub rotation: Rotation,
    pub meeple: Option<Meeple>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub meeples: u8,
    pub connected: bool,
    pub is_current: bool,
}

pub fn export_state(game: &Game) -> GameSnapshot {
    let phase = match &game.phase {
        TurnPhase::NotStarted => PhaseSnapshot::NotStarted,
        TurnPhase::DrawTile => PhaseSnapshot::DrawTile,
        TurnPhase::PlayTile(pending) => PhaseSnapshot::PlayTile {
            tile: pending.tile.id,
            rotation: pending.rotation.degrees(),
            coords: pending.legal_coords.clone(),
        },
        TurnPhase::PlaceMeeple(pending) => PhaseSnapshot::PlaceMeeple {
            coord: pending.coord,
            claimable: pending.claimable.clone(),
        },
        TurnPhase::Ended => PhaseSnapshot::Ended,
    };

    let cells = game
        .board
        .cells()
        .sorted_by_key(|cell| cell.coord)
        .map(|cell| CellSnapshot {
            tile: cell.tile.id,
            coord: cell.coord,
            rotation: cell.rotation,
            meeple: cell.meeple,
        })
        .collect();

    let players = game
        .players
        .iter()
        .enumerate()
        .map(|(index, player)| PlayerSnapshot {
            id: player.id,
            name: player.name.clone(),
            score: player.score,
            meeples: player.meeples,
            connected: player.connected,
            is_current: index == game.current_player_index(),
        })
        .collect();

    GameSnapshot {
        phase,
        cells,
        players,
        tiles_remaining: game.tiles_remaining(),
    }
}
