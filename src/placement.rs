//! Placement legality: a candidate tile may join the board only where every
//! existing neighbor exposes the same feature kind across the shared edge.

use itertools::Itertools;

use crate::board::Board;
use crate::catalog::Tile;
use crate::coords::Coordinate;
use crate::types::{FeatureKind, Side};

/// The feature kind a tile exposes on one of its sides. Any side not owned
/// by a road or a city is field.
pub fn feature_kind_on(tile: &Tile, side: Side) -> FeatureKind {
    if tile.roads.iter().any(|road| road.connections.contains(&side)) {
        FeatureKind::Road
    } else if tile.cities.iter().any(|city| city.connections.contains(&side)) {
        FeatureKind::City
    } else {
        FeatureKind::Field
    }
}

/// Whether `tile` (already rotated) may be placed at `coord`: every side
/// with an existing neighbor must face a matching feature kind, and at
/// least one neighbor must exist. The opening seed cell is placed outside
/// this check.
pub fn is_placeable(board: &Board, tile: &Tile, coord: Coordinate) -> bool {
    if board.cell(coord).is_some() {
        return false;
    }
    let mut has_neighbor = false;
    for side in Side::ALL {
        let Some(neighbor) = board.cell(coord.neighbor(side)) else {
            continue;
        };
        has_neighbor = true;
        if feature_kind_on(&neighbor.tile, side.opposite()) != feature_kind_on(tile, side) {
            return false;
        }
    }
    has_neighbor
}

/// All coordinates where `tile` (already rotated) may legally be placed:
/// the empty frontier around the existing cells, filtered by
/// [`is_placeable`], sorted for a deterministic order.
pub fn placeable_coordinates(board: &Board, tile: &Tile) -> Vec<Coordinate> {
    board
        .cells()
        .flat_map(|cell| cell.coord.orthogonal_neighbors())
        .filter(|&coord| board.cell(coord).is_none())
        .unique()
        .filter(|&coord| is_placeable(board, tile, coord))
        .sorted()
        .collect()
}
