use tilelands::board::Board;
use tilelands::catalog::{TileId, tile_by_id};
use tilelands::coords::Coordinate;
use tilelands::placement::{feature_kind_on, is_placeable, placeable_coordinates};
use tilelands::types::{Rotation, Side};

fn place(board: &mut Board, id: TileId, at: (i32, i32), rotation: Rotation) {
    let tile = tile_by_id(id).rotated(rotation);
    board
        .place(Coordinate::new(at.0, at.1), tile, rotation)
        .expect("cell free");
}

#[test]
fn lone_road_stub_tile_offers_its_field_sides() {
    // tile 0 has a road on the bottom and fields everywhere else, so a
    // second copy can only join left or right of the first
    let mut board = Board::new();
    place(&mut board, 0, (0, 0), Rotation::R0);

    let coords = placeable_coordinates(&board, tile_by_id(0));
    assert_eq!(
        coords,
        vec![Coordinate::new(-1, 0), Coordinate::new(1, 0)]
    );
}

#[test]
fn coordinate_without_neighbors_is_never_placeable() {
    let mut board = Board::new();
    place(&mut board, 1, (0, 0), Rotation::R0);

    assert!(!is_placeable(&board, tile_by_id(1), Coordinate::new(5, 5)));
    assert!(is_placeable(&board, tile_by_id(1), Coordinate::new(1, 0)));
}

#[test]
fn occupied_cell_is_rejected_by_board_and_checker() {
    let mut board = Board::new();
    place(&mut board, 1, (0, 0), Rotation::R0);

    assert!(!is_placeable(&board, tile_by_id(1), Coordinate::new(0, 0)));
    let err = board.place(
        Coordinate::new(0, 0),
        tile_by_id(1).clone(),
        Rotation::R0,
    );
    assert!(err.is_err());
}

#[test]
fn all_city_neighbor_blocks_field_tile_at_every_rotation() {
    let mut board = Board::new();
    place(&mut board, 2, (0, 0), Rotation::R0);

    for rotation in Rotation::ALL {
        let rotated = tile_by_id(1).rotated(rotation);
        assert!(placeable_coordinates(&board, &rotated).is_empty());
    }
}

#[test]
fn legal_placements_are_symmetric_across_the_shared_edge() {
    let mut board = Board::new();
    place(&mut board, 3, (0, 0), Rotation::R0);
    place(&mut board, 20, (0, 1), Rotation::R90);

    for &id in &[0u16, 3, 9, 20, 21, 22] {
        for rotation in Rotation::ALL {
            let candidate = tile_by_id(id).rotated(rotation);
            for coord in placeable_coordinates(&board, &candidate) {
                for side in Side::ALL {
                    if let Some(neighbor) = board.cell(coord.neighbor(side)) {
                        assert_eq!(
                            feature_kind_on(&candidate, side),
                            feature_kind_on(&neighbor.tile, side.opposite()),
                            "tile {id} at {coord} rotation {rotation:?} mismatched on {side}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn rotating_a_candidate_moves_its_legal_coordinates() {
    // tile 20 is a straight top-bottom road; against the starting tile's
    // left-right road it only fits once rotated to run left-right itself
    let mut board = Board::new();
    place(&mut board, 3, (0, 0), Rotation::R0);

    let upright = tile_by_id(20).clone();
    let sideways = tile_by_id(20).rotated(Rotation::R90);

    assert!(!placeable_coordinates(&board, &upright)
        .contains(&Coordinate::new(1, 0)));
    assert!(placeable_coordinates(&board, &sideways)
        .contains(&Coordinate::new(1, 0)));
}
