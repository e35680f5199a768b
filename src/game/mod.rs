pub mod command;
pub mod players;
pub mod snapshot;
pub mod state;

pub use command::{Command, process_command};
pub use players::{Player, PlayerId, STARTING_MEEPLES};
pub use snapshot::{CellSnapshot, GameSnapshot, PhaseSnapshot, PlayerSnapshot, export_state};
pub use state::{Game, GameConfig, GameError, PendingMeeple, PendingTile, PhaseKind, TurnPhase};
