//! Error type shared by the board, the game loop and move sources

use thiserror::Error;

/// Errors raised by the Hex core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("({row},{col}) is out of bounds for a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("({row},{col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("invalid board size {0}: must be at least 1 and N*N must fit in memory")]
    InvalidSize(usize),

    #[error("board is full, no move left to choose")]
    BoardFull,

    #[error("move input closed")]
    InputClosed,

    #[error("move source rejected {attempts} times in a row")]
    TooManyRejections { attempts: usize },
}
