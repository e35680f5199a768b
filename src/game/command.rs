use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;
use crate::game::state::{Game, GameError};
use crate::structures::ClaimSpot;

/// A parsed client command. The transport layer deserializes the wire
/// message; the engine only sees this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Command {
    StartGame,
    NewGame,
    DrawTile,
    PlayTile { coord: Coordinate },
    RotateTile,
    PlaceMeeple { claim: ClaimSpot },
    SkipMeeple,
}

/// Maps a command onto the matching state-machine transition. A returned
/// error means the game was not mutated; the caller logs and drops the
/// command without disconnecting anyone.
pub fn process_command(game: &mut Game, command: Command) -> Result<(), GameError> {
    match command {
        Command::StartGame => game.start(),
        Command::NewGame => game.new_base_game(),
        Command::DrawTile => game.draw(),
        Command::PlayTile { coord } => game.play(coord),
        Command::RotateTile => game.rotate(),
        Command::PlaceMeeple { claim } => game.place_meeple(claim),
        Command::SkipMeeple => game.skip_meeple(),
    }
}
