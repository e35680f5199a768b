//! Structure resolution: the generic walker that follows a chain of
//! connected feature instances across the board, and the settlement pass
//! that scores and clears finished chains after a placement.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, PlacedCell};
use crate::catalog::{Anchor, City, Field, Road, Tile};
use crate::coords::Coordinate;
use crate::game::PlayerId;
use crate::types::{Connector, Corner, FeatureKind, Side};

/// A walkable feature class. Roads and cities chain across edges, fields
/// across half-edge connectors; cloisters have no connections and are
/// resolved by neighborhood instead.
pub trait Structure: Sized {
    type Conn: Connector;
    const KIND: FeatureKind;

    /// The instances of this class on a (rotated) tile.
    fn of(tile: &Tile) -> &[Self];
    fn connections(&self) -> &[Self::Conn];
    fn anchor(&self) -> Anchor;
}

impl Structure for Road {
    type Conn = Side;
    const KIND: FeatureKind = FeatureKind::Road;

    fn of(tile: &Tile) -> &[Self] {
        &tile.roads
    }

    fn connections(&self) -> &[Side] {
        &self.connections
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }
}

impl Structure for City {
    type Conn = Side;
    const KIND: FeatureKind = FeatureKind::City;

    fn of(tile: &Tile) -> &[Self] {
        &tile.cities
    }

    fn connections(&self) -> &[Side] {
        &self.connections
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }
}

impl Structure for Field {
    type Conn = Corner;
    const KIND: FeatureKind = FeatureKind::Field;

    fn of(tile: &Tile) -> &[Self] {
        &tile.fields
    }

    fn connections(&self) -> &[Corner] {
        &self.connections
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }
}

pub struct Walk<A> {
    /// True when no connection of the chain points at an empty coordinate.
    pub closed: bool,
    pub acc: A,
}

/// A feature instance is identified within its cell by its first connection
/// label. Coordinate alone would not do: a chain can loop back through the
/// same cell via a second, distinct instance.
fn representative<S: Structure>(structure: &S) -> S::Conn {
    structure.connections()[0]
}

/// Follows the chain containing `structure` across the board with an
/// explicit work stack, invoking `visit` once per reached feature instance.
/// A missing neighbor marks the walk open but never aborts it, so token and
/// cell accounting stay complete. A neighbor without a facing feature means
/// the catalog or a rotation is broken and panics loudly.
pub fn walk<'a, S: Structure, A>(
    board: &'a Board,
    start: Coordinate,
    structure: &'a S,
    initial: A,
    mut visit: impl FnMut(&mut A, &'a PlacedCell, &'a S),
) -> Walk<A> {
    let mut acc = initial;
    let mut closed = true;
    let mut stack: Vec<(Coordinate, &'a S)> = vec![(start, structure)];
    let mut visited: HashSet<(Coordinate, S::Conn)> = HashSet::new();
    visited.insert((start, representative(structure)));

    while let Some((coord, feature)) = stack.pop() {
        let cell = board
            .cell(coord)
            .unwrap_or_else(|| panic!("walk reached unplaced cell {coord}"));
        visit(&mut acc, cell, feature);

        for &conn in feature.connections() {
            let next = coord.shifted(conn.offset());
            let Some(neighbor) = board.cell(next) else {
                closed = false;
                continue;
            };
            let matched = S::of(&neighbor.tile)
                .iter()
                .find(|other| other.connections().contains(&conn.facing()))
                .unwrap_or_else(|| {
                    panic!(
                        "no {} feature facing {:?} at {next}: catalog or rotation inconsistent",
                        S::KIND,
                        conn
                    )
                });
            if visited.insert((next, representative(matched))) {
                stack.push((next, matched));
            }
        }
    }

    Walk { closed, acc }
}

/// Whether any cell along the chain of `structure` carries a meeple sitting
/// on that chain's own feature instance.
pub fn chain_has_meeple<S: Structure>(board: &Board, coord: Coordinate, structure: &S) -> bool {
    walk(board, coord, structure, false, |found, cell, feature| {
        if let Some(meeple) = cell.meeple {
            if meeple.kind == S::KIND && meeple.anchor == feature.anchor() {
                *found = true;
            }
        }
    })
    .acc
}

/// A feature of a freshly placed tile that a meeple may be put on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSpot {
    pub kind: FeatureKind,
    pub anchor: Anchor,
}

/// The claimable features of the cell at `coord`: every field, road and
/// city whose chain carries no meeple yet, plus the cloister if present (a
/// freshly placed cell cannot already hold one).
pub fn claim_positions(board: &Board, coord: Coordinate) -> Vec<ClaimSpot> {
    let cell = board
        .cell(coord)
        .unwrap_or_else(|| panic!("no cell at {coord}"));
    let tile = &cell.tile;

    let mut spots = Vec::new();
    for f in &tile.fields {
        if !chain_has_meeple(board, coord, f) {
            spots.push(ClaimSpot {
                kind: FeatureKind::Field,
                anchor: f.anchor,
            });
        }
    }
    for road in &tile.roads {
        if !chain_has_meeple(board, coord, road) {
            spots.push(ClaimSpot {
                kind: FeatureKind::Road,
                anchor: road.anchor,
            });
        }
    }
    for city in &tile.cities {
        if !chain_has_meeple(board, coord, city) {
            spots.push(ClaimSpot {
                kind: FeatureKind::City,
                anchor: city.anchor,
            });
        }
    }
    if let Some(cloister) = &tile.cloister {
        spots.push(ClaimSpot {
            kind: FeatureKind::Cloister,
            anchor: cloister.anchor,
        });
    }
    spots
}

/// Points awarded and meeples returned by one settlement pass, per player.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Payout {
    pub points: HashMap<PlayerId, u32>,
    pub returned: HashMap<PlayerId, u8>,
}

impl Payout {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.returned.is_empty()
    }
}

pub const CLOISTER_POINTS: u32 = 9;

#[derive(Default)]
struct ChainSurvey {
    meeples: HashMap<PlayerId, u8>,
    claimed_cells: Vec<Coordinate>,
    cells: HashSet<Coordinate>,
}

/// Resolves every structure touched by the placement at `coord`: walks each
/// road and city feature of the placed tile, pays out finished chains, and
/// checks the 3×3 neighborhood for completed cloisters. Open chains are
/// left exactly as they are, however often this runs.
pub fn settle_finished_structures(board: &mut Board, coord: Coordinate) -> Payout {
    let placed = board
        .cell(coord)
        .unwrap_or_else(|| panic!("settling unplaced cell {coord}"))
        .tile
        .clone();

    let mut payout = Payout::default();
    for road in &placed.roads {
        settle_chain(board, coord, road, &mut payout);
    }
    for city in &placed.cities {
        settle_chain(board, coord, city, &mut payout);
    }
    settle_cloisters(board, coord, &mut payout);
    payout
}

/// Walks one chain and, if closed, awards the distinct-cell count to every
/// player holding the maximum meeple count on it (shared majority, ties not
/// split), then clears and returns every meeple on the chain. Clearing
/// happens before the next feature of the same placement walks, so a chain
/// reachable through two features of one tile pays out exactly once.
fn settle_chain<S: Structure>(
    board: &mut Board,
    coord: Coordinate,
    structure: &S,
    payout: &mut Payout,
) {
    let survey = walk(
        &*board,
        coord,
        structure,
        ChainSurvey::default(),
        |acc, cell, feature| {
            if let Some(meeple) = cell.meeple {
                if meeple.kind == S::KIND && meeple.anchor == feature.anchor() {
                    *acc.meeples.entry(meeple.owner).or_default() += 1;
                    acc.claimed_cells.push(cell.coord);
                }
            }
            acc.cells.insert(cell.coord);
        },
    );

    if !survey.closed {
        return;
    }
    let Some(&max) = survey.acc.meeples.values().max() else {
        return;
    };
    let cell_count = survey.acc.cells.len() as u32;
    debug!(kind = %S::KIND, cells = cell_count, "structure finished");

    for (&owner, &count) in &survey.acc.meeples {
        if count == max {
            *payout.points.entry(owner).or_default() += cell_count;
        }
        *payout.returned.entry(owner).or_default() += count;
    }
    for claimed in survey.acc.claimed_cells {
        board.clear_meeple(claimed);
    }
}

/// A claimed cloister completes once all eight surrounding cells exist; it
/// is worth its 3×3 neighborhood. Placing a tile can complete a cloister on
/// any cell of the placement's own 3×3 block, so all nine are checked.
fn settle_cloisters(board: &mut Board, coord: Coordinate, payout: &mut Payout) {
    let mut finished: Vec<(Coordinate, PlayerId)> = Vec::new();
    for candidate in coord.block() {
        let Some(cell) = board.cell(candidate) else {
            continue;
        };
        let Some(cloister) = &cell.tile.cloister else {
            continue;
        };
        let Some(meeple) = cell.meeple else {
            continue;
        };
        if meeple.kind != FeatureKind::Cloister || meeple.anchor != cloister.anchor {
            continue;
        }
        if candidate.block().all(|c| board.cell(c).is_some()) {
            finished.push((candidate, meeple.owner));
        }
    }

    for (cloister_coord, owner) in finished {
        debug!(at = %cloister_coord, "cloister finished");
        *payout.points.entry(owner).or_default() += CLOISTER_POINTS;
        *payout.returned.entry(owner).or_default() += 1;
        board.clear_meeple(cloister_coord);
    }
}
