//! Game loop - alternates move sources over a live board
//!
//! ## Architecture
//! - Level 1: play() - whole game
//! - Level 2: play_turn() - one accepted move
//! - Level 3: request_move() - propose/validate retry loop

use serde::Serialize;
use tracing::{debug, warn};

use crate::board::{Board, Player};
use crate::connectivity;
use crate::error::HexError;
use crate::player::MoveSource;

/// Consecutive rejected proposals tolerated before giving up on an
/// automated source; interactive sources are re-asked indefinitely
pub const DEFAULT_MAX_RETRIES: usize = 16;

/// One accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub row: usize,
    pub col: usize,
}

/// Result of a single turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Won(Player),
}

/// Finished game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub size: usize,
    pub winner: Player,
    pub moves: Vec<MoveRecord>,
}

/// A game in progress
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<MoveRecord>,
    max_retries: usize,
}

impl Game {
    pub fn new(size: usize) -> Result<Self, HexError> {
        Ok(Self::from_board(Board::new(size)?))
    }

    /// Continue from an existing position
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn winner(&self) -> Option<Player> {
        connectivity::winner(&self.board)
    }

    // ========================================================================
    // LEVEL 1 - WHOLE GAME
    // ========================================================================

    /// Play until one side has connected, asking `source_a` for Player A's
    /// moves and `source_b` for Player B's
    pub fn play(
        &mut self,
        source_a: &mut dyn MoveSource,
        source_b: &mut dyn MoveSource,
    ) -> Result<GameRecord, HexError> {
        loop {
            let source: &mut dyn MoveSource = match self.board.active_player() {
                Player::A => &mut *source_a,
                Player::B => &mut *source_b,
            };
            if let TurnOutcome::Won(winner) = self.play_turn(source)? {
                return Ok(GameRecord {
                    size: self.board.size(),
                    winner,
                    moves: self.history.clone(),
                });
            }
        }
    }

    // ========================================================================
    // LEVEL 2 - TURN
    // ========================================================================

    /// Get one legal move from `source`, apply it, pass the turn and check
    /// both players for a win
    pub fn play_turn(&mut self, source: &mut dyn MoveSource) -> Result<TurnOutcome, HexError> {
        if let Some(winner) = self.winner() {
            return Ok(TurnOutcome::Won(winner));
        }

        let player = self.board.active_player();
        let (row, col) = self.request_move(source)?;
        self.history.push(MoveRecord { player, row, col });
        self.board.toggle_turn();

        debug!(
            "move {}: {} ({}) plays ({},{})",
            self.history.len(),
            player,
            source.name(),
            row,
            col
        );

        Ok(match self.winner() {
            Some(winner) => TurnOutcome::Won(winner),
            None => TurnOutcome::Continue,
        })
    }

    // ========================================================================
    // LEVEL 3 - PROPOSAL LOOP
    // ========================================================================

    fn request_move(&mut self, source: &mut dyn MoveSource) -> Result<(usize, usize), HexError> {
        let mut rejections = 0;
        loop {
            let (row, col) = source.propose_move(&self.board)?;
            match self.board.try_apply_move(row, col) {
                Ok(()) => return Ok((row, col)),
                Err(err) => {
                    rejections += 1;
                    warn!("{} proposed an invalid move: {}", source.name(), err);
                    if !source.is_interactive() && rejections >= self.max_retries {
                        return Err(HexError::TooManyRejections {
                            attempts: rejections,
                        });
                    }
                    source.on_rejected(&err);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
