use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::board::{Board, Meeple, OccupiedCell};
use crate::catalog::{self, Tile, TileId};
use crate::coords::Coordinate;
use crate::game::players::{Player, PlayerId, STARTING_MEEPLES};
use crate::placement::placeable_coordinates;
use crate::structures::{ClaimSpot, Payout, claim_positions, settle_finished_structures};
use crate::types::Rotation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: u64,
    pub meeples_per_player: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            meeples_per_player: STARTING_MEEPLES,
        }
    }
}

/// Discriminant of [`TurnPhase`], used for guards, errors and snapshots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    NotStarted,
    DrawTile,
    PlayTile,
    PlaceMeeple,
    Ended,
}

/// The tile drawn this turn, its current rotation, and where it may go.
#[derive(Debug, Clone)]
pub struct PendingTile {
    pub tile: Tile,
    pub rotation: Rotation,
    pub legal_coords: Vec<Coordinate>,
}

/// The placement just committed and the claims it still offers.
#[derive(Debug, Clone)]
pub struct PendingMeeple {
    pub coord: Coordinate,
    pub claimable: Vec<ClaimSpot>,
}

#[derive(Debug, Clone)]
pub enum TurnPhase {
    NotStarted,
    DrawTile,
    PlayTile(PendingTile),
    PlaceMeeple(PendingMeeple),
    Ended,
}

impl TurnPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::NotStarted => PhaseKind::NotStarted,
            TurnPhase::DrawTile => PhaseKind::DrawTile,
            TurnPhase::PlayTile(_) => PhaseKind::PlayTile,
            TurnPhase::PlaceMeeple(_) => PhaseKind::PlaceMeeple,
            TurnPhase::Ended => PhaseKind::Ended,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("command requires phase {expected} but game is in {found}")]
    OutOfPhase {
        expected: PhaseKind,
        found: PhaseKind,
    },
    #[error("{0} is not a legal placement")]
    IllegalCoordinate(Coordinate),
    #[error("claim {0:?} is not available on the placed tile")]
    UnavailableClaim(ClaimSpot),
    #[error("no meeples left in reserve")]
    NoMeeplesLeft,
    #[error("game already started")]
    AlreadyStarted,
    #[error("cannot start a game without players")]
    NoPlayers,
    #[error(transparent)]
    Occupied(#[from] OccupiedCell),
}

/// One game instance: board, player ledgers and the turn state machine.
///
/// A `Game` is a single-writer aggregate. Every transition is a synchronous
/// in-memory computation; the surrounding dispatcher must feed it one
/// command at a time (per-game mailbox or mutex), since transitions are not
/// idempotent. Independent games share nothing and may run in parallel.
#[derive(Debug)]
pub struct Game {
    pub id: Uuid,
    pub config: GameConfig,
    pub board: Board,
    pub players: Vec<Player>,
    pub phase: TurnPhase,
    current_player: usize,
    deck: Vec<TileId>,
    discarded: Vec<TileId>,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            id: Uuid::new_v4(),
            config,
            board: Board::new(),
            players: Vec::new(),
            phase: TurnPhase::NotStarted,
            current_player: 0,
            deck: Vec::new(),
            discarded: Vec::new(),
            rng,
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase.kind() != PhaseKind::NotStarted
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn tiles_remaining(&self) -> usize {
        self.deck.len()
    }

    /*
     * Roster
     */

    pub fn add_player(&mut self) -> Result<&Player, GameError> {
        if self.has_started() {
            return Err(GameError::AlreadyStarted);
        }
        self.players.push(Player::new());
        Ok(self.players.last().expect("player just pushed"))
    }

    /// Mid-game departures only mark the player disconnected; identity and
    /// ledger survive for reconnection.
    pub fn remove_player(&mut self, id: PlayerId) {
        if self.has_started() {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
                player.connected = false;
            }
        } else {
            self.players.retain(|p| p.id != id);
        }
    }

    pub fn reconnect_player(&mut self, id: PlayerId) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.connected = true;
                true
            }
            None => false,
        }
    }

    /*
     * State transitions
     */

    /// Prepares a fresh board and draw pile. Allowed before the first start
    /// and after a game has ended, never mid-game. Seed cells bypass
    /// placement validation; the board is connected from them onward.
    pub fn new_game(
        &mut self,
        seeds: &[(TileId, Coordinate, Rotation)],
        deck: Vec<TileId>,
    ) -> Result<(), GameError> {
        if !self.deck.is_empty() && self.phase.kind() != PhaseKind::Ended {
            return Err(GameError::OutOfPhase {
                expected: PhaseKind::Ended,
                found: self.phase.kind(),
            });
        }
        let mut board = Board::new();
        for &(id, coord, rotation) in seeds {
            board.place(coord, catalog::tile_by_id(id).rotated(rotation), rotation)?;
        }
        let mut deck = deck;
        deck.shuffle(&mut self.rng);

        self.board = board;
        self.deck = deck;
        self.discarded.clear();
        self.phase = TurnPhase::NotStarted;
        info!(seeds = seeds.len(), tiles = self.deck.len(), "new game prepared");
        Ok(())
    }

    /// The catalog base set: starting tile at the origin, full draw pile.
    pub fn new_base_game(&mut self) -> Result<(), GameError> {
        self.new_game(
            &[(catalog::STARTING_TILE, Coordinate::new(0, 0), Rotation::R0)],
            catalog::base_deck(),
        )
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.expect_phase(PhaseKind::NotStarted)?;
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let meeples = self.config.meeples_per_player;
        for player in &mut self.players {
            player.reset_for_start(meeples);
        }
        self.current_player = 0;
        self.phase = TurnPhase::DrawTile;
        info!(players = self.players.len(), "game started");
        Ok(())
    }

    /// Draws the next tile and enters the play phase with the legal
    /// coordinates for rotation 0. A tile with no legal coordinate at any
    /// rotation is discarded and the next one drawn; if that exhausts the
    /// pile the game ends instead.
    pub fn draw(&mut self) -> Result<(), GameError> {
        self.expect_phase(PhaseKind::DrawTile)?;
        assert!(
            !self.deck.is_empty(),
            "draw-tile phase entered with an empty draw pile"
        );

        while let Some(id) = self.deck.pop() {
            let template = catalog::tile_by_id(id);
            let placeable_somewhere = Rotation::ALL.iter().any(|&rotation| {
                !placeable_coordinates(&self.board, &template.rotated(rotation)).is_empty()
            });
            if !placeable_somewhere {
                warn!(tile = id, "tile has no legal placement at any rotation, discarding");
                self.discarded.push(id);
                continue;
            }

            let tile = template.clone();
            let legal_coords = placeable_coordinates(&self.board, &tile);
            debug!(tile = id, options = legal_coords.len(), "tile drawn");
            self.phase = TurnPhase::PlayTile(PendingTile {
                tile,
                rotation: Rotation::R0,
                legal_coords,
            });
            return Ok(());
        }

        info!("draw pile exhausted by unplaceable tiles, ending game");
        self.phase = TurnPhase::Ended;
        Ok(())
    }

    /// Rotates the pending tile 90° clockwise and recomputes where it may
    /// go. Always legal; the coordinate list may become empty, in which
    /// case the player keeps rotating.
    pub fn rotate(&mut self) -> Result<(), GameError> {
        let found = self.phase.kind();
        let TurnPhase::PlayTile(pending) = &mut self.phase else {
            return Err(GameError::OutOfPhase {
                expected: PhaseKind::PlayTile,
                found,
            });
        };
        pending.rotation = pending.rotation.next();
        pending.tile = pending.tile.rotated(Rotation::R90);
        pending.legal_coords = placeable_coordinates(&self.board, &pending.tile);
        Ok(())
    }

    /// Commits the pending tile to the board and exposes the claimable
    /// features of the new cell.
    pub fn play(&mut self, coord: Coordinate) -> Result<(), GameError> {
        let found = self.phase.kind();
        let TurnPhase::PlayTile(pending) = &self.phase else {
            return Err(GameError::OutOfPhase {
                expected: PhaseKind::PlayTile,
                found,
            });
        };
        if !pending.legal_coords.contains(&coord) {
            return Err(GameError::IllegalCoordinate(coord));
        }

        let TurnPhase::PlayTile(pending) = std::mem::replace(&mut self.phase, TurnPhase::DrawTile)
        else {
            unreachable!("phase checked above");
        };
        self.board.place(coord, pending.tile, pending.rotation)?;
        let claimable = claim_positions(&self.board, coord);
        debug!(at = %coord, claims = claimable.len(), "tile played");
        self.phase = TurnPhase::PlaceMeeple(PendingMeeple { coord, claimable });
        Ok(())
    }

    /// Spends one meeple from the acting player's reserve on one of the
    /// offered claims, then completes the turn.
    pub fn place_meeple(&mut self, claim: ClaimSpot) -> Result<(), GameError> {
        let found = self.phase.kind();
        let TurnPhase::PlaceMeeple(pending) = &self.phase else {
            return Err(GameError::OutOfPhase {
                expected: PhaseKind::PlaceMeeple,
                found,
            });
        };
        if !pending.claimable.contains(&claim) {
            return Err(GameError::UnavailableClaim(claim));
        }
        let coord = pending.coord;
        let player = &self.players[self.current_player];
        if player.meeples == 0 {
            return Err(GameError::NoMeeplesLeft);
        }
        let owner = player.id;

        self.players[self.current_player].meeples -= 1;
        self.board.set_meeple(
            coord,
            Meeple {
                kind: claim.kind,
                anchor: claim.anchor,
                owner,
            },
        );
        self.finish_turn(coord);
        Ok(())
    }

    /// Completes the turn without claiming anything.
    pub fn skip_meeple(&mut self) -> Result<(), GameError> {
        let found = self.phase.kind();
        let TurnPhase::PlaceMeeple(pending) = &self.phase else {
            return Err(GameError::OutOfPhase {
                expected: PhaseKind::PlaceMeeple,
                found,
            });
        };
        let coord = pending.coord;
        self.finish_turn(coord);
        Ok(())
    }

    /// Settles finished structures around the placement, applies the payout
    /// to the ledgers and hands the turn to the next player. The game ends
    /// when the draw pile is out.
    fn finish_turn(&mut self, coord: Coordinate) {
        let payout = settle_finished_structures(&mut self.board, coord);
        self.apply_payout(&payout);

        self.phase = if self.deck.is_empty() {
            info!("draw pile empty, game over");
            TurnPhase::Ended
        } else {
            TurnPhase::DrawTile
        };
        if !self.players.is_empty() {
            self.current_player = (self.current_player + 1) % self.players.len();
        }
    }

    fn apply_payout(&mut self, payout: &Payout) {
        for (&id, &points) in &payout.points {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
                player.score += points;
                info!(player = %player.name, points, "points awarded");
            }
        }
        for (&id, &count) in &payout.returned {
            if let Some(player) = self.players.iter_mut().find(|p| p.id == id) {
                player.meeples += count;
            }
        }
    }

    fn expect_phase(&self, expected: PhaseKind) -> Result<(), GameError> {
        let found = self.phase.kind();
        if found == expected {
            Ok(())
        } else {
            Err(GameError::OutOfPhase { expected, found })
        }
    }
}
