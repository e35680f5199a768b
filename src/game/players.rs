use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Meeples handed to each player when a game starts.
pub const STARTING_MEEPLES: u8 = 8;

/// Per-player ledger. Identity is stable across reconnection; score and the
/// meeple reserve are the only fields the engine mutates during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub meeples: u8,
    pub connected: bool,
}

impl Player {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        let name = format!("player-{}", &id.to_string()[..4]);
        Self {
            id,
            name,
            score: 0,
            meeples: 0,
            connected: true,
        }
    }

    pub(crate) fn reset_for_start(&mut self, meeples: u8) {
        self.score = 0;
        self.meeples = meeples;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
