#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod catalog;
pub mod coords;
pub mod game;
pub mod placement;
pub mod structures;
pub mod types;

pub use board::{Board, Meeple, PlacedCell};
pub use catalog::{Anchor, Tile, TileId};
pub use coords::Coordinate;
pub use game::{Command, Game, GameConfig, GameError, GameSnapshot, Player, PlayerId};
pub use structures::ClaimSpot;
pub use types::{Corner, FeatureKind, Rotation, Side};
