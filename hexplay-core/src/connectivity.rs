//! Win detection by blocking-path search
//!
//! A player has won when the opponent can no longer connect their own two
//! edges through cells the player does not own. Player A (left-right) is
//! therefore checked with a top-to-bottom search, and Player B (top-bottom)
//! with a left-to-right search. On a full board this is equivalent to the
//! player having connected their own edges, and exactly one player wins.

use rustc_hash::FxHashSet;

use crate::board::{Board, Player};

/// True if `player` has completed a connection between their edges
pub fn check_win(board: &Board, player: Player) -> bool {
    let (start, end) = edge_cells(board, player);
    !blocking_path_exists(board, player, &start, &end)
}

/// The winner of the position, if any
pub fn winner(board: &Board) -> Option<Player> {
    [Player::A, Player::B]
        .into_iter()
        .find(|&player| check_win(board, player))
}

/// Traversable cells on the source edge and the opposite edge of the
/// blocking search for `player`
fn edge_cells(board: &Board, player: Player) -> (Vec<usize>, FxHashSet<usize>) {
    let n = board.size();
    let edge = |i: usize, far: bool| -> usize {
        let line = if far { n - 1 } else { 0 };
        match player {
            // Rows: top edge to bottom edge
            Player::A => line * n + i,
            // Columns: left edge to right edge
            Player::B => i * n + line,
        }
    };

    let start = (0..n)
        .map(|i| edge(i, false))
        .filter(|&idx| !board.is_owned_by(idx, player))
        .collect();
    let end = (0..n)
        .map(|i| edge(i, true))
        .filter(|&idx| !board.is_owned_by(idx, player))
        .collect();
    (start, end)
}

/// Iterative depth-first search over cells not owned by `player`
fn blocking_path_exists(
    board: &Board,
    player: Player,
    start: &[usize],
    end: &FxHashSet<usize>,
) -> bool {
    let mut visited = vec![false; board.cell_count()];
    let mut stack: Vec<usize> = Vec::with_capacity(board.cell_count());

    for &origin in start {
        if visited[origin] {
            continue;
        }
        visited[origin] = true;
        stack.push(origin);

        while let Some(idx) = stack.pop() {
            if end.contains(&idx) {
                return true;
            }
            for next in board.neighbors_of(idx) {
                if !visited[next] && !board.is_owned_by(next, player) {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }

    false
}

// ============================================================================
// TESTS
// ============================================================================
