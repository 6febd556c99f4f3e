//! HEXPLAY MCTS - Monte Carlo move selection for Hex
//!
//! This crate provides flat Monte Carlo search:
//! - Random playouts on board snapshots
//! - Per-cell scoring from playout outcomes
//! - Optional rayon-parallel trials (`parallel` feature)
//! - A `MoveSource` that plays with it

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hexplay_core::{Board, HexError, MoveSource};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod playout;
pub mod selector;

pub use playout::{playout, PlayoutEngine, PlayoutOutcome};
pub use selector::{choose_move, search, ScoreTable, SearchResult};

/// Monte Carlo configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Playouts per move decision
    pub simulations: usize,
    /// Base seed; drawn from entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    pub fn new(simulations: usize) -> Self {
        Self {
            simulations,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Shared flag that stops an in-flight search
///
/// Clones observe the same flag, so one clone can be handed to another
/// thread and cancelled from there.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can stop the next search
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Monte Carlo player
pub struct MonteCarloPlayer {
    name: String,
    config: MonteCarloConfig,
    cancel: CancelToken,
    /// Derives a fresh search seed for every move
    rng: ChaCha8Rng,
}

impl MonteCarloPlayer {
    pub fn new(config: MonteCarloConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            name: format!("monte-carlo({})", config.simulations),
            config,
            cancel: CancelToken::new(),
            rng,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Token that cancels this player's search in flight
    ///
    /// Every search starts with the token cleared, so a cancel only cuts
    /// short the search it lands in.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Full search result for the player to move on `board`
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, HexError> {
        let config = MonteCarloConfig {
            seed: Some(self.rng.gen()),
            ..self.config.clone()
        };
        self.cancel.reset();
        search(board, &config, &self.cancel)
    }
}

impl MoveSource for MonteCarloPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, board: &Board) -> Result<(usize, usize), HexError> {
        self.search(board).map(|result| result.best)
    }
}
