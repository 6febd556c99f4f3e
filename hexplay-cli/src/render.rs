//! ASCII board drawing
//!
//! Rows are shifted right one column per line so the rhombus reads as a hex
//! grid. Cell rows alternate with link rows:
//!
//! ```text
//! X - . - .
//!  \ / \ / \
//!   . - O - .
//! ```

use hexplay_core::{Board, Cell, Player};

pub fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Owned(Player::A) => 'X',
        Cell::Owned(Player::B) => 'O',
    }
}

/// Draw the whole board, one line per cell row and link row
pub fn draw(board: &Board) -> String {
    let n = board.size();
    let cells = board.render();
    let width = n * 2 - 1;
    let mut out = String::new();

    for line in 0..width {
        out.push_str(&" ".repeat(line));
        if line % 2 == 0 {
            let row = line / 2;
            let row_cells: Vec<String> = (0..n)
                .map(|col| symbol(cells[row * n + col]).to_string())
                .collect();
            out.push_str(&row_cells.join(" - "));
        } else {
            for j in 0..width {
                out.push_str(if j % 2 == 0 { "\\ " } else { "/ " });
            }
        }
        out.push('\n');
    }

    out
}
