//! Move sources - anything that can propose a move for the side to play

use crate::board::Board;
use crate::error::HexError;

/// A participant that proposes moves
///
/// Sources are handed the live board by reference at call time and must not
/// keep it. Proposals are validated by the game loop, so a source may
/// propose an illegal move and simply be asked again.
pub trait MoveSource {
    /// Display name used in logs and reports
    fn name(&self) -> &str;

    /// Propose `(row, col)` for the player to move on `board`
    fn propose_move(&mut self, board: &Board) -> Result<(usize, usize), HexError>;

    /// Called after a proposal was rejected, before the next one is requested
    fn on_rejected(&mut self, _error: &HexError) {}

    /// Interactive sources are re-asked until they propose a legal move;
    /// the game loop's rejection cap applies only to automated ones
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Plays a fixed list of moves in order; useful for scripted openings and tests
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    name: String,
    moves: Vec<(usize, usize)>,
    next: usize,
    interactive: bool,
}

impl ScriptedSource {
    pub fn new(name: impl Into<String>, moves: Vec<(usize, usize)>) -> Self {
        Self {
            name: name.into(),
            moves,
            next: 0,
            interactive: false,
        }
    }

    /// Stand in for a person at the keyboard
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

impl MoveSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, _board: &Board) -> Result<(usize, usize), HexError> {
        let mv = self.moves.get(self.next).copied().ok_or(HexError::InputClosed)?;
        self.next += 1;
        Ok(mv)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
