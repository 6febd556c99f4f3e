//! HEXPLAY Core - Hex board and connectivity engine
//!
//! This crate provides the core game logic for Hex:
//! - Board storage (N×N rhombus, row-major cells)
//! - Hex adjacency and move application
//! - Win detection via blocking-path search
//! - The `MoveSource` seam and the turn-alternating game loop

pub mod board;
pub mod connectivity;
pub mod error;
pub mod game;
pub mod player;

// Re-exports for convenient access
pub use board::{Board, Cell, Player, NEIGHBOR_OFFSETS};
pub use connectivity::{check_win, winner};
pub use error::HexError;
pub use game::{Game, GameRecord, MoveRecord, TurnOutcome, DEFAULT_MAX_RETRIES};
pub use player::{MoveSource, ScriptedSource};
