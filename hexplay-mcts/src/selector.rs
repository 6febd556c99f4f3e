//! Move selection from playout statistics
//!
//! For every trial, each candidate cell (empty on the real board) that the
//! player to move owns at the end of the playout gets +1 if that player won
//! and -1 if they lost. The highest score wins; ties go to the lowest index.
//!
//! The score measures how often owning a cell coincides with winning, not
//! how much the cell contributed. It is a crude heuristic and is kept as is.
//!
//! ## Architecture
//! - Level 1: choose_move() / search()
//! - Level 2: run_trials() - sequential or rayon
//! - Level 3: ScoreTable::record() - scoring one trial
//! - Level 4: best-candidate selection

use std::time::Instant;

use hexplay_core::{Board, HexError, Player};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::playout::{PlayoutEngine, PlayoutOutcome};
use crate::{CancelToken, MonteCarloConfig};

// ============================================================================
// SCORE TABLE
// ============================================================================

/// Per-candidate scores for one move decision
#[derive(Clone, Debug)]
pub struct ScoreTable {
    /// Candidate indices, ascending
    candidates: Vec<usize>,
    scores: FxHashMap<usize, i32>,
    trials: usize,
}

impl ScoreTable {
    /// Empty table over every empty cell of `board`
    pub fn new(board: &Board) -> Self {
        let candidates: Vec<usize> = board.empty_cells().collect();
        let scores = candidates.iter().map(|&idx| (idx, 0)).collect();
        Self {
            candidates,
            scores,
            trials: 0,
        }
    }

    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    pub fn score(&self, idx: usize) -> Option<i32> {
        self.scores.get(&idx).copied()
    }

    /// Number of trials recorded
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Score one finished trial for `player`
    pub fn record(&mut self, outcome: &PlayoutOutcome, player: Player) {
        let delta = if outcome.winner == player { 1 } else { -1 };
        for &idx in &self.candidates {
            if outcome.board.is_owned_by(idx, player) {
                if let Some(score) = self.scores.get_mut(&idx) {
                    *score += delta;
                }
            }
        }
        self.trials += 1;
    }

    /// Combine two tables built over the same candidates
    pub fn merge(mut self, other: ScoreTable) -> ScoreTable {
        for (idx, score) in other.scores {
            *self.scores.entry(idx).or_insert(0) += score;
        }
        self.trials += other.trials;
        self
    }

    /// Highest-scoring candidate and its score; the lowest index wins ties
    pub fn best(&self) -> Option<(usize, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for &idx in &self.candidates {
            let score = self.scores.get(&idx).copied().unwrap_or(0);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((idx, score)),
            }
        }
        best
    }
}

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Result of a Monte Carlo move search
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Player the move was chosen for
    pub player: Player,
    /// Chosen (row, col)
    pub best: (usize, usize),
    /// Score of the chosen cell
    pub best_score: i32,
    /// Trials actually run (fewer than requested if cancelled)
    pub trials: usize,
    /// Seed the trials were derived from
    pub seed: u64,
    pub scores: ScoreTable,
}

// ============================================================================
// LEVEL 1 - ENTRY POINTS
// ============================================================================

/// Pick the next move for the player to move on `board`
pub fn choose_move(board: &Board, config: &MonteCarloConfig) -> Result<(usize, usize), HexError> {
    search(board, config, &CancelToken::new()).map(|result| result.best)
}

/// Run `config.simulations` playouts from `board` and score the candidates
///
/// `board` is only read; every trial works on its own copy. If `cancel` is
/// triggered, remaining trials are skipped and the move is chosen from the
/// trials already finished.
pub fn search(
    board: &Board,
    config: &MonteCarloConfig,
    cancel: &CancelToken,
) -> Result<SearchResult, HexError> {
    if board.is_full() {
        return Err(HexError::BoardFull);
    }

    let start = Instant::now();
    let seed = config.seed.unwrap_or_else(rand::random);
    let player = board.active_player();
    let engine = PlayoutEngine::new(seed);

    let scores = run_trials(board, &engine, config.simulations, cancel);

    let (best_idx, best_score) = scores.best().ok_or(HexError::BoardFull)?;
    let best = board.coords_of(best_idx);

    debug!(
        "search for {}: {} trials in {:?}, best ({},{}) score {}",
        player,
        scores.trials(),
        start.elapsed(),
        best.0,
        best.1,
        best_score
    );

    Ok(SearchResult {
        player,
        best,
        best_score,
        trials: scores.trials(),
        seed,
        scores,
    })
}

// ============================================================================
// LEVEL 2 - TRIAL LOOPS
// ============================================================================

fn run_trials(
    board: &Board,
    engine: &PlayoutEngine,
    simulations: usize,
    cancel: &CancelToken,
) -> ScoreTable {
    #[cfg(feature = "parallel")]
    return run_trials_parallel(board, engine, simulations, cancel);

    #[cfg(not(feature = "parallel"))]
    return run_trials_sequential(board, engine, simulations, cancel);
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn run_trials_sequential(
    board: &Board,
    engine: &PlayoutEngine,
    simulations: usize,
    cancel: &CancelToken,
) -> ScoreTable {
    let player = board.active_player();
    let mut scores = ScoreTable::new(board);

    for trial in 0..simulations {
        if cancel.is_cancelled() {
            break;
        }
        let outcome = engine.run(board, trial as u64);
        scores.record(&outcome, player);
    }

    scores
}

/// Trials on the rayon pool, one partial table per worker, merged at the end
#[cfg(feature = "parallel")]
fn run_trials_parallel(
    board: &Board,
    engine: &PlayoutEngine,
    simulations: usize,
    cancel: &CancelToken,
) -> ScoreTable {
    use rayon::prelude::*;

    let player = board.active_player();

    (0..simulations)
        .into_par_iter()
        .fold(
            || ScoreTable::new(board),
            |mut scores, trial| {
                if !cancel.is_cancelled() {
                    let outcome = engine.run(board, trial as u64);
                    scores.record(&outcome, player);
                }
                scores
            },
        )
        .reduce(|| ScoreTable::new(board), ScoreTable::merge)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config(simulations: usize, seed: u64) -> MonteCarloConfig {
        MonteCarloConfig::new(simulations).with_seed(seed)
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut board = Board::new(2).unwrap();
        for idx in 0..4 {
            board.play_index(idx);
        }
        assert_eq!(choose_move(&board, &config(10, 1)), Err(HexError::BoardFull));
    }

    #[test]
    fn test_only_empty_cells_are_candidates() {
        let mut board = Board::new(3).unwrap();
        board.apply_move(1, 1);
        board.toggle_turn();
        board.apply_move(0, 0);
        board.toggle_turn();

        let result = search(&board, &config(50, 11), &CancelToken::new()).unwrap();
        assert_eq!(result.scores.candidates(), &[1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(result.scores.score(4), None);
        assert_eq!(result.scores.score(0), None);
        assert_ne!(result.best, (1, 1));
        assert_ne!(result.best, (0, 0));
        assert_eq!(result.trials, 50);
    }

    #[test]
    fn test_live_board_not_mutated() {
        let mut board = Board::new(4).unwrap();
        board.apply_move(0, 3);
        let before = board.clone();

        choose_move(&board, &config(100, 5)).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let board = Board::new(5).unwrap();
        let first = search(&board, &config(80, 21), &CancelToken::new()).unwrap();
        let second = search(&board, &config(80, 21), &CancelToken::new()).unwrap();
        assert_eq!(first.best, second.best);
        assert_eq!(first.best_score, second.best_score);
        for &idx in first.scores.candidates() {
            assert_eq!(first.scores.score(idx), second.scores.score(idx));
        }
    }

    #[test]
    fn test_finds_immediate_win() {
        // Only (1,0) completes the middle row; B owning it completes the left column
        let mut board = Board::new(3).unwrap();
        board.place(1, 2, Player::A).unwrap();
        board.place(1, 1, Player::A).unwrap();
        board.place(0, 0, Player::B).unwrap();
        board.place(2, 0, Player::B).unwrap();
        board.place(0, 1, Player::B).unwrap();

        let (row, col) = choose_move(&board, &config(400, 3)).unwrap();
        assert_eq!((row, col), (1, 0));
    }

    #[test]
    fn test_record_scoring_rule() {
        let board = Board::new(2).unwrap();
        let mut scores = ScoreTable::new(&board);

        // A owns the top row and wins
        let mut won = board.clone();
        won.place(0, 0, Player::A).unwrap();
        won.place(0, 1, Player::A).unwrap();
        won.place(1, 0, Player::B).unwrap();
        won.place(1, 1, Player::B).unwrap();
        scores.record(
            &PlayoutOutcome {
                board: won,
                winner: Player::A,
                moves_played: 4,
            },
            Player::A,
        );
        assert_eq!(scores.score(0), Some(1));
        assert_eq!(scores.score(1), Some(1));
        assert_eq!(scores.score(2), Some(0));

        // A owns the left column and loses: A's cells are penalised
        let mut lost = board.clone();
        lost.place(0, 0, Player::A).unwrap();
        lost.place(1, 0, Player::A).unwrap();
        lost.place(0, 1, Player::B).unwrap();
        lost.place(1, 1, Player::B).unwrap();
        scores.record(
            &PlayoutOutcome {
                board: lost,
                winner: Player::B,
                moves_played: 4,
            },
            Player::A,
        );
        assert_eq!(scores.score(0), Some(0));
        assert_eq!(scores.score(1), Some(1));
        assert_eq!(scores.score(2), Some(-1));
        assert_eq!(scores.score(3), Some(0));
        assert_eq!(scores.trials(), 2);
        assert_eq!(scores.best(), Some((1, 1)));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let board = Board::new(3).unwrap();
        let scores = ScoreTable::new(&board);
        assert_eq!(scores.best(), Some((0, 0)));
    }

    #[test]
    fn test_merge_adds_scores() {
        let board = Board::new(2).unwrap();
        let mut a = ScoreTable::new(&board);
        let mut b = ScoreTable::new(&board);
        let mut full = board.clone();
        full.place(0, 0, Player::A).unwrap();
        full.place(0, 1, Player::A).unwrap();
        full.place(1, 0, Player::B).unwrap();
        full.place(1, 1, Player::B).unwrap();
        let outcome = PlayoutOutcome {
            board: full,
            winner: Player::A,
            moves_played: 4,
        };
        a.record(&outcome, Player::A);
        b.record(&outcome, Player::A);
        b.record(&outcome, Player::A);

        let merged = a.merge(b);
        assert_eq!(merged.score(0), Some(3));
        assert_eq!(merged.trials(), 3);
    }

    #[test]
    fn test_cancelled_search_still_returns_a_move() {
        let board = Board::new(4).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = search(&board, &config(1000, 8), &cancel).unwrap();
        assert_eq!(result.trials, 0);
        assert_eq!(result.best, (0, 0));
    }

    #[test]
    fn test_zero_simulations() {
        let mut board = Board::new(3).unwrap();
        board.apply_move(0, 0);
        let result = search(&board, &config(0, 1), &CancelToken::new()).unwrap();
        assert_eq!(result.trials, 0);
        assert_eq!(result.best, (0, 1));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut board = Board::new(5).unwrap();
        board.apply_move(2, 2);
        board.toggle_turn();
        let engine = PlayoutEngine::new(33);
        let cancel = CancelToken::new();

        let sequential = run_trials_sequential(&board, &engine, 300, &cancel);
        let parallel = run_trials_parallel(&board, &engine, 300, &cancel);

        assert_eq!(sequential.candidates(), parallel.candidates());
        assert_eq!(sequential.trials(), parallel.trials());
        for &idx in sequential.candidates() {
            assert_eq!(sequential.score(idx), parallel.score(idx), "cell {}", idx);
        }
        assert_eq!(sequential.best(), parallel.best());
    }
}
