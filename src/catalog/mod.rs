//! Static tile catalog: the immutable tile shapes, their feature topology
//! and claim anchors, and the base-set draw distribution. The engine only
//! ever reads this data; placed cells hold rotated working copies.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::{Corner, Rotation, Side};

pub type TileId = u16;

/// Claim anchor in hundredths of the tile span, measured on the unrotated
/// tile template. Anchors identify a feature instance for token placement
/// and are compared exactly, so they stay fixed-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub x: u8,
    pub y: u8,
}

impl Anchor {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub anchor: Anchor,
    pub connections: SmallVec<[Side; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub anchor: Anchor,
    pub connections: SmallVec<[Side; 4]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub anchor: Anchor,
    pub connections: SmallVec<[Corner; 8]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloister {
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub roads: Vec<Road>,
    pub cities: Vec<City>,
    pub fields: Vec<Field>,
    pub cloister: Option<Cloister>,
}

impl Tile {
    /// A copy of this tile with every connection label rotated. Claim
    /// anchors are not moved: rotation is a relabeling of the connection
    /// topology, and anchors stay addressed against the unrotated template.
    pub fn rotated(&self, rotation: Rotation) -> Tile {
        let mut tile = self.clone();
        for _ in 0..rotation.steps() {
            tile.rotate_once();
        }
        tile
    }

    fn rotate_once(&mut self) {
        for road in &mut self.roads {
            for conn in &mut road.connections {
                *conn = conn.rotated();
            }
        }
        for city in &mut self.cities {
            for conn in &mut city.connections {
                *conn = conn.rotated();
            }
        }
        for field in &mut self.fields {
            for conn in &mut field.connections {
                *conn = conn.rotated();
            }
        }
    }
}

/// Catalog lookup. An unknown id means the deck and the catalog disagree,
/// which is a bug rather than a runtime condition.
pub fn tile_by_id(id: TileId) -> &'static Tile {
    TILES_BY_ID
        .get(&id)
        .unwrap_or_else(|| panic!("tile {id} missing from catalog"))
}

/// The tile seeded onto the board by a new game.
pub const STARTING_TILE: TileId = 3;

/// Draw-pile counts for the base set. The starting tile appears once more
/// on the board itself.
const BASE_DISTRIBUTION: &[(TileId, usize)] = &[
    (0, 2),
    (1, 4),
    (2, 1),
    (3, 3),
    (4, 5),
    (5, 2),
    (6, 1),
    (7, 3),
    (8, 2),
    (9, 3),
    (10, 3),
    (11, 3),
    (12, 2),
    (13, 3),
    (14, 2),
    (15, 3),
    (16, 1),
    (17, 3),
    (18, 2),
    (19, 1),
    (20, 8),
    (21, 9),
    (22, 4),
    (23, 1),
];

/// The unshuffled base-set draw pile (71 tiles).
pub fn base_deck() -> Vec<TileId> {
    let mut deck = Vec::with_capacity(71);
    for &(id, count) in BASE_DISTRIBUTION {
        deck.extend(std::iter::repeat(id).take(count));
    }
    deck
}

fn road(anchor: (u8, u8), connections: &[Side]) -> Road {
    Road {
        anchor: Anchor::new(anchor.0, anchor.1),
        connections: connections.iter().copied().collect(),
    }
}

fn city(anchor: (u8, u8), connections: &[Side]) -> City {
    City {
        anchor: Anchor::new(anchor.0, anchor.1),
        connections: connections.iter().copied().collect(),
    }
}

fn field(anchor: (u8, u8), connections: &[Corner]) -> Field {
    Field {
        anchor: Anchor::new(anchor.0, anchor.1),
        connections: connections.iter().copied().collect(),
    }
}

fn cloister(anchor: (u8, u8)) -> Cloister {
    Cloister {
        anchor: Anchor::new(anchor.0, anchor.1),
    }
}

fn bare(id: TileId) -> Tile {
    Tile {
        id,
        roads: Vec::new(),
        cities: Vec::new(),
        fields: Vec::new(),
        cloister: None,
    }
}

pub static BASE_TILES: Lazy<Vec<Tile>> = Lazy::new(|| {
    use Corner::*;
    use Side::*;

    vec![
        // 0: cloister with a road stub
        Tile {
            roads: vec![road((50, 80), &[Bottom])],
            fields: vec![field((20, 20), &Corner::ALL)],
            cloister: Some(cloister((50, 50))),
            ..bare(0)
        },
        // 1: plain cloister
        Tile {
            fields: vec![field((20, 20), &Corner::ALL)],
            cloister: Some(cloister((50, 50))),
            ..bare(1)
        },
        // 2: city covering the whole tile
        Tile {
            cities: vec![city((50, 50), &[Top, Bottom, Left, Right])],
            ..bare(2)
        },
        // 3: city edge over a straight road (the starting tile)
        Tile {
            cities: vec![city((50, 20), &[Top])],
            roads: vec![road((50, 50), &[Left, Right])],
            fields: vec![
                field((20, 35), &[LeftTop, RightTop]),
                field((50, 80), &[BottomLeft, BottomRight, LeftBottom, RightBottom]),
            ],
            ..bare(3)
        },
        // 4: single city edge
        Tile {
            cities: vec![city((50, 20), &[Top])],
            fields: vec![field(
                (50, 50),
                &[
                    BottomLeft,
                    BottomRight,
                    LeftTop,
                    LeftBottom,
                    RightTop,
                    RightBottom,
                ],
            )],
            ..bare(4)
        },
        // 5: city band left-right
        Tile {
            cities: vec![city((50, 50), &[Left, Right])],
            fields: vec![
                field((50, 10), &[TopLeft, TopRight]),
                field((50, 80), &[BottomLeft, BottomRight]),
            ],
            ..bare(5)
        },
        // 6: city band left-right
        Tile {
            cities: vec![city((50, 50), &[Left, Right])],
            fields: vec![
                field((50, 10), &[TopLeft, TopRight]),
                field((50, 80), &[BottomLeft, BottomRight]),
            ],
            ..bare(6)
        },
        // 7: two opposing city edges
        Tile {
            cities: vec![city((20, 50), &[Left]), city((80, 50), &[Right])],
            fields: vec![field((50, 50), &[TopLeft, TopRight, BottomLeft, BottomRight])],
            ..bare(7)
        },
        // 8: two adjacent city edges
        Tile {
            cities: vec![city((50, 10), &[Top]), city((80, 50), &[Right])],
            fields: vec![field((40, 60), &[BottomLeft, BottomRight, LeftTop, LeftBottom])],
            ..bare(8)
        },
        // 9: city edge, road bending bottom-right
        Tile {
            cities: vec![city((50, 20), &[Top])],
            roads: vec![road((60, 60), &[Bottom, Right])],
            fields: vec![
                field((20, 50), &[BottomLeft, LeftTop, LeftBottom, RightTop]),
                field((80, 80), &[BottomRight, RightBottom]),
            ],
            ..bare(9)
        },
        // 10: city edge, road bending bottom-left
        Tile {
            cities: vec![city((50, 20), &[Top])],
            roads: vec![road((40, 60), &[Bottom, Left])],
            fields: vec![
                field((80, 50), &[BottomRight, LeftTop, RightTop, RightBottom]),
                field((20, 80), &[BottomLeft, LeftBottom]),
            ],
            ..bare(10)
        },
        // 11: city edge over a three-way road junction
        Tile {
            cities: vec![city((50, 20), &[Top])],
            roads: vec![
                road((20, 50), &[Left]),
                road((80, 50), &[Right]),
                road((50, 80), &[Bottom]),
            ],
            fields: vec![
                field((60, 35), &[LeftTop, RightTop]),
                field((80, 80), &[BottomRight, RightBottom]),
                field((20, 80), &[BottomLeft, LeftBottom]),
            ],
            ..bare(11)
        },
        // 12: city corner
        Tile {
            cities: vec![city((20, 20), &[Top, Left])],
            fields: vec![field(
                (70, 70),
                &[BottomLeft, BottomRight, RightTop, RightBottom],
            )],
            ..bare(12)
        },
        // 13: city corner
        Tile {
            cities: vec![city((20, 20), &[Top, Left])],
            fields: vec![field(
                (70, 70),
                &[BottomLeft, BottomRight, RightTop, RightBottom],
            )],
            ..bare(13)
        },
        // 14: city corner with a road corner
        Tile {
            cities: vec![city((20, 20), &[Top, Left])],
            roads: vec![road((70, 70), &[Bottom, Right])],
            fields: vec![
                field((60, 60), &[BottomLeft, RightTop]),
                field((90, 90), &[BottomRight, RightBottom]),
            ],
            ..bare(14)
        },
        // 15: city corner with a road corner
        Tile {
            cities: vec![city((20, 20), &[Top, Left])],
            roads: vec![road((70, 70), &[Bottom, Right])],
            fields: vec![
                field((60, 60), &[BottomLeft, RightTop]),
                field((90, 90), &[BottomRight, RightBottom]),
            ],
            ..bare(15)
        },
        // 16: three-sided city
        Tile {
            cities: vec![city((50, 40), &[Top, Left, Right])],
            fields: vec![field((50, 80), &[BottomLeft, BottomRight])],
            ..bare(16)
        },
        // 17: three-sided city
        Tile {
            cities: vec![city((50, 40), &[Top, Left, Right])],
            fields: vec![field((50, 80), &[BottomLeft, BottomRight])],
            ..bare(17)
        },
        // 18: three-sided city over a road stub
        Tile {
            cities: vec![city((50, 40), &[Top, Left, Right])],
            roads: vec![road((50, 80), &[Bottom])],
            fields: vec![
                field((25, 80), &[BottomLeft]),
                field((75, 80), &[BottomRight]),
            ],
            ..bare(18)
        },
        // 19: three-sided city over a road stub
        Tile {
            cities: vec![city((50, 40), &[Top, Left, Right])],
            roads: vec![road((50, 80), &[Bottom])],
            fields: vec![
                field((25, 80), &[BottomLeft]),
                field((75, 80), &[BottomRight]),
            ],
            ..bare(19)
        },
        // 20: straight road
        Tile {
            roads: vec![road((50, 50), &[Top, Bottom])],
            fields: vec![
                field((20, 50), &[TopLeft, BottomLeft, LeftTop, LeftBottom]),
                field((80, 50), &[TopRight, BottomRight, RightTop, RightBottom]),
            ],
            ..bare(20)
        },
        // 21: road corner
        Tile {
            roads: vec![road((40, 60), &[Bottom, Left])],
            fields: vec![
                field((20, 80), &[BottomLeft, LeftBottom]),
                field(
                    (80, 20),
                    &[TopLeft, TopRight, BottomRight, LeftTop, RightTop, RightBottom],
                ),
            ],
            ..bare(21)
        },
        // 22: three-way road junction
        Tile {
            roads: vec![
                road((20, 50), &[Left]),
                road((80, 50), &[Right]),
                road((50, 80), &[Bottom]),
            ],
            fields: vec![
                field((50, 20), &[TopLeft, TopRight, LeftTop, RightTop]),
                field((20, 80), &[BottomLeft, LeftBottom]),
                field((80, 80), &[BottomRight, RightBottom]),
            ],
            ..bare(22)
        },
        // 23: four-way road junction
        Tile {
            roads: vec![
                road((50, 20), &[Top]),
                road((20, 50), &[Left]),
                road((80, 50), &[Right]),
                road((50, 80), &[Bottom]),
            ],
            fields: vec![
                field((20, 20), &[TopLeft, LeftTop]),
                field((80, 20), &[TopRight, RightTop]),
                field((20, 80), &[BottomLeft, LeftBottom]),
                field((80, 80), &[BottomRight, RightBottom]),
            ],
            ..bare(23)
        },
    ]
});

static TILES_BY_ID: Lazy<HashMap<TileId, Tile>> = Lazy::new(|| {
    BASE_TILES
        .iter()
        .map(|tile| (tile.id, tile.clone()))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_deck_has_expected_size() {
        assert_eq!(base_deck().len(), 71);
        assert!(base_deck().iter().all(|&id| id < BASE_TILES.len() as TileId));
    }

    #[test]
    fn starting_tile_exists() {
        assert_eq!(tile_by_id(STARTING_TILE).id, STARTING_TILE);
    }

    #[test]
    fn four_rotations_restore_every_tile() {
        for tile in BASE_TILES.iter() {
            let mut rotated = tile.clone();
            for _ in 0..4 {
                rotated = rotated.rotated(Rotation::R90);
            }
            assert_eq!(&rotated, tile, "tile {} not restored", tile.id);
        }
    }

    #[test]
    fn sides_are_covered_by_at_most_one_road_or_city() {
        for tile in BASE_TILES.iter() {
            for side in Side::ALL {
                let covering = tile
                    .roads
                    .iter()
                    .filter(|r| r.connections.contains(&side))
                    .count()
                    + tile
                        .cities
                        .iter()
                        .filter(|c| c.connections.contains(&side))
                        .count();
                assert!(
                    covering <= 1,
                    "tile {} side {side} covered {covering} times",
                    tile.id
                );
            }
        }
    }

    #[test]
    fn corners_partition_between_fields_and_cities() {
        for tile in BASE_TILES.iter() {
            for corner in Corner::ALL {
                let covered = tile
                    .fields
                    .iter()
                    .filter(|f| f.connections.contains(&corner))
                    .count();
                let (dx, dy) = corner.offset();
                let side = Side::ALL
                    .into_iter()
                    .find(|s| s.offset() == (dx, dy))
                    .unwrap();
                let city_side = tile.cities.iter().any(|c| c.connections.contains(&side));
                if city_side {
                    assert_eq!(covered, 0, "tile {} corner {corner} inside city", tile.id);
                } else {
                    assert_eq!(covered, 1, "tile {} corner {corner} uncovered", tile.id);
                }
            }
        }
    }
}
