//! Random playouts - finish a game from a snapshot with uniform random moves
//!
//! ## Architecture
//! - Level 2: PlayoutEngine - per-trial seeding
//! - Level 3: playout() - single simulation
//! - Level 4: random cell selection

use hexplay_core::{Board, Player};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// PLAYOUT OUTCOME
// ============================================================================

/// Result of a playout simulation
#[derive(Clone, Debug)]
pub struct PlayoutOutcome {
    /// The filled board
    pub board: Board,
    /// The single winner of the filled board
    pub winner: Player,
    /// Number of moves played
    pub moves_played: usize,
}

// ============================================================================
// SINGLE PLAYOUT (Level 3)
// ============================================================================

/// Fill `snapshot` with random moves, alternating players, and report who won
///
/// Cells are drawn uniformly from the whole board; taken cells are redrawn.
/// The winner is decided by checking the player who was to move in the
/// snapshot, since a full board always has exactly one winner.
pub fn playout<R: Rng>(mut snapshot: Board, rng: &mut R) -> PlayoutOutcome {
    let to_move = snapshot.active_player();
    let mut moves_played = 0;

    while !snapshot.is_full() {
        let idx = random_cell(&snapshot, rng);
        if snapshot.play_index(idx) {
            moves_played += 1;
        }
    }

    let winner = if snapshot.check_win(to_move) {
        to_move
    } else {
        to_move.opponent()
    };

    PlayoutOutcome {
        board: snapshot,
        winner,
        moves_played,
    }
}

fn random_cell<R: Rng>(board: &Board, rng: &mut R) -> usize {
    rng.gen_range(0..board.cell_count())
}

// ============================================================================
// PLAYOUT ENGINE (Level 2)
// ============================================================================

/// Runs numbered trials from a base seed
///
/// Trial `i` is seeded with `seed + i`, so a trial's outcome does not depend
/// on which thread runs it or in what order.
#[derive(Clone, Copy, Debug)]
pub struct PlayoutEngine {
    seed: u64,
}

impl PlayoutEngine {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Play trial number `trial` on a fresh copy of `board`
    pub fn run(&self, board: &Board, trial: u64) -> PlayoutOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(trial));
        playout(board.clone(), &mut rng)
    }
}

// ============================================================================
// TESTS
// ============================================================================
