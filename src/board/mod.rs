//! Sparse board state: placed cells keyed by coordinate, each optionally
//! carrying one claim token. The board enforces only "one cell per
//! coordinate"; connector matching and feature rules live above it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Anchor, Tile};
use crate::coords::Coordinate;
use crate::game::PlayerId;
use crate::types::{FeatureKind, Rotation, Side};

/// A player's marker sitting on one feature instance of one placed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeple {
    pub kind: FeatureKind,
    pub anchor: Anchor,
    pub owner: PlayerId,
}

/// A tile committed to the board. The stored tile is the rotated working
/// copy, so feature connections can be read directly; `rotation` is kept
/// for the exported snapshot. Cells are never removed once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCell {
    pub tile: Tile,
    pub rotation: Rotation,
    pub coord: Coordinate,
    pub meeple: Option<Meeple>,
}

#[derive(Debug, thiserror::Error)]
#[error("cell at {0} is already occupied")]
pub struct OccupiedCell(pub Coordinate);

#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: HashMap<Coordinate, PlacedCell>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, coord: Coordinate) -> Option<&PlacedCell> {
        self.cells.get(&coord)
    }

    /// Commits a rotated tile to `coord`. The caller is responsible for
    /// legality; the board only rejects double occupancy.
    pub fn place(
        &mut self,
        coord: Coordinate,
        tile: Tile,
        rotation: Rotation,
    ) -> Result<(), OccupiedCell> {
        if self.cells.contains_key(&coord) {
            return Err(OccupiedCell(coord));
        }
        self.cells.insert(
            coord,
            PlacedCell {
                tile,
                rotation,
                coord,
                meeple: None,
            },
        );
        Ok(())
    }

    pub fn set_meeple(&mut self, coord: Coordinate, meeple: Meeple) {
        if let Some(cell) = self.cells.get_mut(&coord) {
            cell.meeple = Some(meeple);
        }
    }

    pub fn clear_meeple(&mut self, coord: Coordinate) -> Option<Meeple> {
        self.cells.get_mut(&coord).and_then(|cell| cell.meeple.take())
    }

    /// The four edge-adjacent cells in [`Side::ALL`] order.
    pub fn neighbors(&self, coord: Coordinate) -> [Option<&PlacedCell>; 4] {
        Side::ALL.map(|side| self.cell(coord.neighbor(side)))
    }

    pub fn cells(&self) -> impl Iterator<Item = &PlacedCell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Count of meeples currently committed to cells.
    pub fn meeples_on_board(&self) -> usize {
        self.cells.values().filter(|cell| cell.meeple.is_some()).count()
    }
}
