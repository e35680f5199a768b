use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Edge connection label for roads and cities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// One 90° clockwise rotation step.
    pub fn rotated(self) -> Self {
        match self {
            Side::Top => Side::Right,
            Side::Right => Side::Bottom,
            Side::Bottom => Side::Left,
            Side::Left => Side::Top,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }
}

/// Half-edge connection label for fields. Each label names a side of the
/// tile and which end of that side it sits on, so a single side can expose
/// two distinct field connectors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Corner {
    TopLeft,
    TopRight,
    RightTop,
    RightBottom,
    BottomRight,
    BottomLeft,
    LeftBottom,
    LeftTop,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::RightTop,
        Corner::RightBottom,
        Corner::BottomRight,
        Corner::BottomLeft,
        Corner::LeftBottom,
        Corner::LeftTop,
    ];

    /// One 90° clockwise rotation step; the eight labels form two
    /// interleaved 4-cycles.
    pub fn rotated(self) -> Self {
        match self {
            Corner::TopLeft => Corner::RightTop,
            Corner::TopRight => Corner::RightBottom,
            Corner::RightTop => Corner::BottomRight,
            Corner::RightBottom => Corner::BottomLeft,
            Corner::BottomRight => Corner::LeftBottom,
            Corner::BottomLeft => Corner::LeftTop,
            Corner::LeftTop => Corner::TopRight,
            Corner::LeftBottom => Corner::TopLeft,
        }
    }

    /// The label on the adjacent cell that touches the same physical
    /// boundary region.
    pub fn facing(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomLeft,
            Corner::TopRight => Corner::BottomRight,
            Corner::BottomLeft => Corner::TopLeft,
            Corner::BottomRight => Corner::TopRight,
            Corner::LeftTop => Corner::RightTop,
            Corner::LeftBottom => Corner::RightBottom,
            Corner::RightTop => Corner::LeftTop,
            Corner::RightBottom => Corner::LeftBottom,
        }
    }

    /// Field connectors cross into the edge-adjacent neighbor named by
    /// their side prefix, never diagonally.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Corner::TopLeft | Corner::TopRight => (0, -1),
            Corner::BottomLeft | Corner::BottomRight => (0, 1),
            Corner::LeftTop | Corner::LeftBottom => (-1, 0),
            Corner::RightTop | Corner::RightBottom => (1, 0),
        }
    }
}

/// A labeled exposure of a feature toward a neighboring cell. Implemented by
/// [`Side`] (roads, cities) and [`Corner`] (fields) so the structure walker
/// can be generic over both.
pub trait Connector: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    /// The label on the neighboring cell facing this one.
    fn facing(self) -> Self;
    /// Unit move toward the cell this connector points at.
    fn offset(self) -> (i32, i32);
}

impl Connector for Side {
    fn facing(self) -> Self {
        self.opposite()
    }

    fn offset(self) -> (i32, i32) {
        Side::offset(self)
    }
}

impl Connector for Corner {
    fn facing(self) -> Self {
        Corner::facing(self)
    }

    fn offset(self) -> (i32, i32) {
        Corner::offset(self)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Number of 90° steps this rotation applies.
    pub fn steps(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    pub fn degrees(self) -> u16 {
        self.steps() as u16 * 90
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureKind {
    Road,
    City,
    Field,
    Cloister,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_rotation_has_order_four() {
        for side in Side::ALL {
            assert_eq!(side.rotated().rotated().rotated().rotated(), side);
        }
    }

    #[test]
    fn corner_rotation_has_order_four() {
        for corner in Corner::ALL {
            assert_eq!(corner.rotated().rotated().rotated().rotated(), corner);
        }
    }

    #[test]
    fn facing_is_an_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
        }
        for corner in Corner::ALL {
            assert_eq!(corner.facing().facing(), corner);
        }
    }

    #[test]
    fn facing_connectors_point_back() {
        for side in Side::ALL {
            let (dx, dy) = side.offset();
            let (bx, by) = side.opposite().offset();
            assert_eq!((dx + bx, dy + by), (0, 0));
        }
        for corner in Corner::ALL {
            let (dx, dy) = corner.offset();
            let (bx, by) = corner.facing().offset();
            assert_eq!((dx + bx, dy + by), (0, 0));
        }
    }
}
