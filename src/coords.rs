use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Sparse board coordinate. The board has no bounds; y grows downward so
/// [`Side::Top`] is a step toward negative y.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn shifted(self, (dx, dy): (i32, i32)) -> Self {
        Coordinate::new(self.x + dx, self.y + dy)
    }

    pub fn neighbor(self, side: Side) -> Self {
        self.shifted(side.offset())
    }

    /// The four edge-adjacent coordinates, in [`Side::ALL`] order.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Coordinate> {
        Side::ALL.into_iter().map(move |side| self.neighbor(side))
    }

    /// The 3×3 block centered on this coordinate, including itself.
    pub fn block(self) -> impl Iterator<Item = Coordinate> {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| self.shifted((dx, dy))))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
