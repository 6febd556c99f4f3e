//! Hex board storage and adjacency
//!
//! The board is an N×N rhombus stored row-major (`index = row * N + col`).
//! Cells carry no position of their own; position is implied by the index.

use std::fmt;

use serde::Serialize;

use crate::connectivity;
use crate::error::HexError;

/// Neighbor offsets as (drow, dcol), in the order they are yielded
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (-1, 0),  // up
    (-1, 1),  // up-right
    (0, -1),  // left
    (0, 1),   // right
    (1, -1),  // down-left
    (1, 0),   // down
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity
///
/// `A` moves first and connects the left edge to the right edge.
/// `B` connects the top edge to the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

/// State of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Owned(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Owned(p) => Some(p),
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Hex board (clone to snapshot)
///
/// A clone shares nothing with the original, so simulations can run on
/// clones without touching the live game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    /// Number of non-empty cells
    filled: usize,
    /// Player to move next
    active: Player,
}

impl Board {
    /// Create an empty board with Player A to move
    pub fn new(size: usize) -> Result<Self, HexError> {
        let cell_count = match size.checked_mul(size) {
            Some(count) if count > 0 => count,
            _ => return Err(HexError::InvalidSize(size)),
        };
        Ok(Self {
            size,
            cells: vec![Cell::Empty; cell_count],
            filled: 0,
            active: Player::A,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn filled_count(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn set_active_player(&mut self, player: Player) {
        self.active = player;
    }

    /// Hand the move to the other player
    pub fn toggle_turn(&mut self) {
        self.active = self.active.opponent();
    }

    // ========================================================================
    // CELL QUERIES
    // ========================================================================

    /// Panics if `idx >= cell_count()`
    pub fn is_empty(&self, idx: usize) -> bool {
        self.cells[idx] == Cell::Empty
    }

    /// Panics if `idx >= cell_count()`
    pub fn is_owned_by(&self, idx: usize, player: Player) -> bool {
        self.cells[idx] == Cell::Owned(player)
    }

    /// Panics if `idx >= cell_count()`
    pub fn owner_of(&self, idx: usize) -> Option<Player> {
        self.cells[idx].owner()
    }

    /// Row-major view of every cell, for drawing
    pub fn render(&self) -> &[Cell] {
        &self.cells
    }

    /// Indices of all empty cells, ascending
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(idx, _)| idx)
    }

    // ========================================================================
    // INDEX TRANSLATION
    // ========================================================================

    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, HexError> {
        if row >= self.size || col >= self.size {
            return Err(HexError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    /// Panics if `idx >= cell_count()`
    pub fn coords_of(&self, idx: usize) -> (usize, usize) {
        assert!(idx < self.cells.len(), "cell index {} out of range", idx);
        (idx / self.size, idx % self.size)
    }

    /// In-bounds neighbors of `idx`, in `NEIGHBOR_OFFSETS` order
    ///
    /// The rhombus uses the up-right/down-left diagonal, so (r-1,c-1) and
    /// (r+1,c+1) are not adjacent.
    pub fn neighbors_of(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.size as isize;
        let (row, col) = self.coords_of(idx);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            if (0..n).contains(&r) && (0..n).contains(&c) {
                Some(r as usize * self.size + c as usize)
            } else {
                None
            }
        })
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Claim (row, col) for the active player
    ///
    /// Does not hand over the turn; see [`Board::toggle_turn`].
    pub fn try_apply_move(&mut self, row: usize, col: usize) -> Result<(), HexError> {
        self.place(row, col, self.active)
    }

    /// Boolean form of [`Board::try_apply_move`]; `false` leaves the board untouched
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        self.try_apply_move(row, col).is_ok()
    }

    /// Claim (row, col) for an explicit player, ignoring whose turn it is
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), HexError> {
        let idx = self.index_of(row, col)?;
        if !self.is_empty(idx) {
            return Err(HexError::OccupiedCell { row, col });
        }
        self.cells[idx] = Cell::Owned(player);
        self.filled += 1;
        Ok(())
    }

    /// Claim a cell by index for the active player and pass the turn
    ///
    /// Returns `false` if the cell is taken. Used by playouts, which draw
    /// raw indices.
    pub fn play_index(&mut self, idx: usize) -> bool {
        if !self.is_empty(idx) {
            return false;
        }
        self.cells[idx] = Cell::Owned(self.active);
        self.filled += 1;
        self.toggle_turn();
        true
    }

    pub fn check_win(&self, player: Player) -> bool {
        connectivity::check_win(self, player)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.cell_count(), 25);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.active_player(), Player::A);
        assert!(board.render().iter().all(|c| *c == Cell::Empty));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Board::new(0), Err(HexError::InvalidSize(0)));
    }

    #[test]
    fn test_overflowing_size_rejected() {
        let size = usize::MAX;
        assert_eq!(Board::new(size), Err(HexError::InvalidSize(size)));
        let size = 1usize << (usize::BITS / 2);
        assert_eq!(Board::new(size), Err(HexError::InvalidSize(size)));
    }

    #[test]
    #[should_panic]
    fn test_cell_query_past_end_panics() {
        let board = Board::new(3).unwrap();
        board.is_empty(board.cell_count());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_coords_past_end_panics() {
        let board = Board::new(3).unwrap();
        board.coords_of(9);
    }

    #[test]
    fn test_index_of_bounds() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.index_of(0, 0), Ok(0));
        assert_eq!(board.index_of(1, 2), Ok(5));
        assert_eq!(board.index_of(2, 2), Ok(8));
        assert!(matches!(board.index_of(3, 0), Err(HexError::OutOfBounds { .. })));
        assert!(matches!(board.index_of(0, 3), Err(HexError::OutOfBounds { .. })));
        assert_eq!(board.coords_of(5), (1, 2));
    }

    #[test]
    fn test_apply_move_marks_active_player() {
        let mut board = Board::new(3).unwrap();
        assert!(board.apply_move(1, 1));
        assert!(board.is_owned_by(4, Player::A));
        assert_eq!(board.owner_of(4), Some(Player::A));
        assert_eq!(board.filled_count(), 1);
        // Turn control stays with the caller
        assert_eq!(board.active_player(), Player::A);

        board.toggle_turn();
        assert!(board.apply_move(0, 0));
        assert!(board.is_owned_by(0, Player::B));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_occupied_rejected_idempotently() {
        let mut board = Board::new(3).unwrap();
        assert!(board.apply_move(2, 1));
        let before = board.clone();

        board.toggle_turn();
        assert!(!board.apply_move(2, 1));
        assert!(!board.apply_move(2, 1));
        assert_eq!(board.filled_count(), 1);
        assert!(board.is_owned_by(7, Player::A));
        assert_eq!(board.render(), before.render());
        assert_eq!(
            board.try_apply_move(2, 1),
            Err(HexError::OccupiedCell { row: 2, col: 1 })
        );
    }

    #[test]
    fn test_out_of_bounds_move() {
        let mut board = Board::new(3).unwrap();
        assert!(!board.apply_move(3, 0));
        assert_eq!(
            board.try_apply_move(0, 7),
            Err(HexError::OutOfBounds { row: 0, col: 7, size: 3 })
        );
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_neighbors_interior() {
        let board = Board::new(3).unwrap();
        let neighbors: Vec<usize> = board.neighbors_of(4).collect();
        // (0,1) (0,2) (1,0) (1,2) (2,0) (2,1)
        assert_eq!(neighbors, vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_neighbors_corners() {
        let board = Board::new(3).unwrap();
        let top_left: Vec<usize> = board.neighbors_of(0).collect();
        assert_eq!(top_left, vec![1, 3]);

        let top_right: Vec<usize> = board.neighbors_of(2).collect();
        assert_eq!(top_right, vec![1, 4, 5]);

        let bottom_left: Vec<usize> = board.neighbors_of(6).collect();
        assert_eq!(bottom_left, vec![3, 4, 7]);

        let bottom_right: Vec<usize> = board.neighbors_of(8).collect();
        assert_eq!(bottom_right, vec![5, 7]);
    }

    #[test]
    fn test_neighbor_symmetry() {
        for size in 1..=6 {
            let board = Board::new(size).unwrap();
            for a in 0..board.cell_count() {
                for b in board.neighbors_of(a) {
                    assert!(
                        board.neighbors_of(b).any(|x| x == a),
                        "{} -> {} not symmetric on size {}",
                        a,
                        b,
                        size
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_cell_has_no_neighbors() {
        let board = Board::new(1).unwrap();
        assert_eq!(board.neighbors_of(0).count(), 0);
    }

    #[test]
    fn test_play_index_toggles_turn() {
        let mut board = Board::new(2).unwrap();
        assert!(board.play_index(3));
        assert_eq!(board.active_player(), Player::B);
        assert!(!board.play_index(3));
        assert_eq!(board.active_player(), Player::B);
        assert!(board.play_index(0));
        assert!(board.is_owned_by(0, Player::B));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut live = Board::new(3).unwrap();
        live.apply_move(0, 0);
        let mut snapshot = live.clone();
        snapshot.apply_move(1, 1);
        assert!(live.is_empty(4));
        assert_eq!(live.filled_count(), 1);
        assert_eq!(snapshot.filled_count(), 2);
    }

    #[test]
    fn test_empty_cells_and_full() {
        let mut board = Board::new(2).unwrap();
        board.place(0, 1, Player::B).unwrap();
        let empties: Vec<usize> = board.empty_cells().collect();
        assert_eq!(empties, vec![0, 2, 3]);
        assert!(!board.is_full());
        for idx in empties {
            assert!(board.play_index(idx));
        }
        assert!(board.is_full());
        assert_eq!(board.filled_count(), 4);
    }
}
