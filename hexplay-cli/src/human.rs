//! Human move source reading `row col` lines

use std::io::{BufRead, Write};

use hexplay_core::{Board, HexError, MoveSource};

/// Reads moves from `input`, prompting on `output`
///
/// Lines that do not parse as two indices are re-requested here; moves
/// that parse but are illegal are rejected by the game loop, which asks
/// again after `on_rejected`.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn say(&mut self, message: &str) {
        // A closed terminal surfaces as InputClosed on the next read
        let _ = writeln!(self.output, "{}", message);
        let _ = self.output.flush();
    }
}

impl<R: BufRead, W: Write> MoveSource for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn propose_move(&mut self, board: &Board) -> Result<(usize, usize), HexError> {
        let prompt = format!(
            "{} ({}) - enter row and column (0..{}):",
            self.name,
            board.active_player(),
            board.size() - 1
        );
        self.say(&prompt);

        loop {
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Err(HexError::InputClosed),
                Ok(_) => {}
            }
            match parse_move(&line) {
                Some(mv) => return Ok(mv),
                None => self.say("please enter two numbers, e.g. `3 4`:"),
            }
        }
    }

    fn on_rejected(&mut self, error: &HexError) {
        self.say(&format!("{}, please re-enter:", error));
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Parse `row col`, separated by whitespace or a comma
pub fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
