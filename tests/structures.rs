use std::collections::HashSet;

use uuid::Uuid;

use tilelands::board::{Board, Meeple};
use tilelands::catalog::{Anchor, TileId, tile_by_id};
use tilelands::coords::Coordinate;
use tilelands::structures::{
    CLOISTER_POINTS, chain_has_meeple, claim_positions, settle_finished_structures, walk,
};
use tilelands::types::{FeatureKind, Rotation};

fn place(board: &mut Board, id: TileId, at: (i32, i32), rotation: Rotation) {
    let tile = tile_by_id(id).rotated(rotation);
    board
        .place(Coordinate::new(at.0, at.1), tile, rotation)
        .expect("cell free");
}

fn claim_road(board: &mut Board, at: (i32, i32), anchor: (u8, u8), owner: Uuid) {
    board.set_meeple(
        Coordinate::new(at.0, at.1),
        Meeple {
            kind: FeatureKind::Road,
            anchor: Anchor::new(anchor.0, anchor.1),
            owner,
        },
    );
}

/// Closure and distinct-cell count of the road chain through the first
/// road feature of the cell at `at`.
fn road_chain(board: &Board, at: (i32, i32)) -> (bool, usize) {
    let coord = Coordinate::new(at.0, at.1);
    let cell = board.cell(coord).expect("cell placed");
    let road = &cell.tile.roads[0];
    let result = walk(board, coord, road, HashSet::new(), |acc, cell, _| {
        acc.insert(cell.coord);
    });
    (result.closed, result.acc.len())
}

/// Four copies of the corner-road tile rotated into a 2×2 ring, minus the
/// closing piece at (0, 0).
fn open_ring() -> Board {
    let mut board = Board::new();
    place(&mut board, 21, (1, 0), Rotation::R0);
    place(&mut board, 21, (1, 1), Rotation::R90);
    place(&mut board, 21, (0, 1), Rotation::R180);
    board
}

fn closed_ring() -> Board {
    let mut board = open_ring();
    place(&mut board, 21, (0, 0), Rotation::R270);
    board
}

#[test]
fn closed_ring_pays_its_cell_count_and_returns_the_meeple() {
    let owner = Uuid::new_v4();
    let mut board = closed_ring();
    claim_road(&mut board, (1, 0), (40, 60), owner);
    assert_eq!(board.meeples_on_board(), 1);

    let payout = settle_finished_structures(&mut board, Coordinate::new(0, 0));

    assert_eq!(payout.points.get(&owner), Some(&4));
    assert_eq!(payout.returned.get(&owner), Some(&1));
    assert_eq!(board.meeples_on_board(), 0);
}

#[test]
fn open_ring_changes_nothing_no_matter_how_often_settled() {
    let owner = Uuid::new_v4();
    let mut board = open_ring();
    claim_road(&mut board, (1, 0), (40, 60), owner);

    for _ in 0..3 {
        let payout = settle_finished_structures(&mut board, Coordinate::new(1, 0));
        assert!(payout.is_empty());
        assert_eq!(board.meeples_on_board(), 1);
    }

    let (closed, _) = road_chain(&board, (1, 0));
    assert!(!closed);
}

#[test]
fn ring_closure_survives_unrelated_growth() {
    let mut board = closed_ring();
    let (closed, cells) = road_chain(&board, (0, 0));
    assert!(closed);
    assert_eq!(cells, 4);

    // grow the board away from the ring; the chain must stay closed
    place(&mut board, 1, (2, 0), Rotation::R0);
    place(&mut board, 1, (2, 1), Rotation::R0);

    let (closed, cells) = road_chain(&board, (0, 0));
    assert!(closed);
    assert_eq!(cells, 4);
}

#[test]
fn meeple_is_seen_from_every_cell_of_its_chain() {
    let owner = Uuid::new_v4();
    let mut board = open_ring();

    for at in [(1, 0), (1, 1), (0, 1)] {
        let coord = Coordinate::new(at.0, at.1);
        let road = &board.cell(coord).expect("placed").tile.roads[0];
        assert!(!chain_has_meeple(&board, coord, road));
    }

    claim_road(&mut board, (1, 0), (40, 60), owner);

    for at in [(1, 0), (1, 1), (0, 1)] {
        let coord = Coordinate::new(at.0, at.1);
        let road = &board.cell(coord).expect("placed").tile.roads[0];
        assert!(chain_has_meeple(&board, coord, road));
    }
}

#[test]
fn chain_claimed_elsewhere_is_not_offered_again() {
    let owner = Uuid::new_v4();
    let mut board = closed_ring();
    claim_road(&mut board, (1, 0), (40, 60), owner);

    let spots = claim_positions(&board, Coordinate::new(0, 0));
    assert!(
        !spots.iter().any(|spot| spot.kind == FeatureKind::Road),
        "road is already claimed along the ring"
    );
    assert!(spots.iter().any(|spot| spot.kind == FeatureKind::Field));
}

#[test]
fn fresh_cell_offers_all_its_features() {
    let mut board = Board::new();
    place(&mut board, 0, (0, 0), Rotation::R0);

    let spots = claim_positions(&board, Coordinate::new(0, 0));
    let kinds: Vec<_> = spots.iter().map(|spot| spot.kind).collect();
    assert!(kinds.contains(&FeatureKind::Field));
    assert!(kinds.contains(&FeatureKind::Road));
    assert!(kinds.contains(&FeatureKind::Cloister));
}

#[test]
fn shared_majority_pays_every_max_holder_in_full() {
    // two players with one meeple each on the same closed ring; both hold
    // the maximum and both receive the full cell count
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let mut board = closed_ring();
    claim_road(&mut board, (1, 0), (40, 60), first);
    claim_road(&mut board, (0, 1), (40, 60), second);

    let payout = settle_finished_structures(&mut board, Coordinate::new(0, 0));

    assert_eq!(payout.points.get(&first), Some(&4));
    assert_eq!(payout.points.get(&second), Some(&4));
    assert_eq!(payout.returned.get(&first), Some(&1));
    assert_eq!(payout.returned.get(&second), Some(&1));
}

#[test]
fn minority_holder_gets_meeple_back_but_no_points() {
    // a five-cell road capped on both ends, with two meeples against one
    let majority = Uuid::new_v4();
    let minority = Uuid::new_v4();
    let mut board = Board::new();
    // straight roads left and right of a two-ended chain:
    // 20 rotated sideways runs left-right
    place(&mut board, 20, (0, 0), Rotation::R90);
    place(&mut board, 20, (1, 0), Rotation::R90);
    place(&mut board, 20, (2, 0), Rotation::R90);
    // cap both ends with road-stub city tiles facing inward
    place(&mut board, 18, (-1, 0), Rotation::R270);
    place(&mut board, 18, (3, 0), Rotation::R90);

    claim_road(&mut board, (0, 0), (50, 50), majority);
    claim_road(&mut board, (1, 0), (50, 50), majority);
    claim_road(&mut board, (2, 0), (50, 50), minority);

    let payout = settle_finished_structures(&mut board, Coordinate::new(1, 0));

    assert_eq!(payout.points.get(&majority), Some(&5));
    assert_eq!(payout.points.get(&minority), None);
    assert_eq!(payout.returned.get(&majority), Some(&2));
    assert_eq!(payout.returned.get(&minority), Some(&1));
    assert_eq!(board.meeples_on_board(), 0);
}

#[test]
fn surrounded_cloister_scores_nine_and_returns_its_meeple() {
    let owner = Uuid::new_v4();
    let mut board = Board::new();
    place(&mut board, 1, (0, 0), Rotation::R0);
    board.set_meeple(
        Coordinate::new(0, 0),
        Meeple {
            kind: FeatureKind::Cloister,
            anchor: Anchor::new(50, 50),
            owner,
        },
    );

    let neighbors = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
    ];
    for at in neighbors {
        place(&mut board, 1, at, Rotation::R0);
        let payout = settle_finished_structures(&mut board, Coordinate::new(at.0, at.1));
        assert!(payout.is_empty(), "cloister settled early at {at:?}");
    }

    // the eighth neighbor closes the 3×3 block
    place(&mut board, 1, (1, 1), Rotation::R0);
    let payout = settle_finished_structures(&mut board, Coordinate::new(1, 1));

    assert_eq!(payout.points.get(&owner), Some(&CLOISTER_POINTS));
    assert_eq!(payout.returned.get(&owner), Some(&1));
    assert_eq!(board.meeples_on_board(), 0);
}
