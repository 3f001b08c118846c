//! Terminal rendering of boards, spawn queues, hints and move outcomes.
//!
//! Balls are drawn with their color letter. Empty cells use a middle dot on
//! terminals that render Unicode and `.` otherwise; the persisted `-` is kept
//! for the one-line board string so it can be pasted back into `hint`.
//!
//! ```rust
//! use line98_engine::cells::Color;
//! use line98_engine::grid::Board;
//! use line98_cli::formatters::format_board;
//!
//! let mut board = Board::empty();
//! board.place(0, Color::Red);
//! let grid = format_board(&board);
//! assert!(grid.lines().nth(1).unwrap().contains('R'));
//! ```

use line98_ai::{Hint, MoveClass};
use line98_engine::cells::Cell;
use line98_engine::engine::MoveOutcome;
use line98_engine::game::SpawnQueue;
use line98_engine::grid::{to_coord, Board, BOARD_SIZE};

/// Whether the terminal can be trusted with non-ASCII glyphs.
///
/// Windows consoles only qualify under Windows Terminal, VS Code, or a
/// terminal that sets `TERM_PROGRAM`.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_cell(cell: Cell) -> char {
    match cell {
        Cell::Ball(color) => color.symbol(),
        Cell::Empty if supports_unicode() => '·',
        Cell::Empty => '.',
    }
}

/// Grid with a column header and row labels, one line per row.
pub fn format_board(board: &Board) -> String {
    let mut s = String::from("  ");
    for col in 0..BOARD_SIZE {
        s.push(' ');
        s.push_str(&col.to_string());
    }
    s.push('\n');
    for (row, cells) in board.rows().enumerate() {
        s.push_str(&format!("{:>2}", row));
        for cell in cells {
            s.push(' ');
            s.push(format_cell(*cell));
        }
        s.push('\n');
    }
    s
}

/// `R G B` for a queue of red, green, blue.
pub fn format_queue(queue: &SpawnQueue) -> String {
    queue
        .colors()
        .iter()
        .map(|c| c.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `(row,col)` of a linear index.
pub fn format_position(index: usize) -> String {
    let (row, col) = to_coord(index);
    format!("({},{})", row, col)
}

pub fn class_label(class: MoveClass) -> &'static str {
    match class {
        MoveClass::Clear => "clear",
        MoveClass::PotentialLine => "potential line",
        MoveClass::Movable => "movable",
    }
}

pub fn format_hint(hint: &Hint) -> String {
    format!(
        "{} {} -> {} {}  score {} ({})",
        hint.from,
        format_position(hint.from),
        hint.to,
        format_position(hint.to),
        hint.score,
        class_label(hint.class)
    )
}

/// One-line summary printed after an accepted move.
pub fn format_outcome(outcome: &MoveOutcome, score: u32) -> String {
    let mut s = format!(
        "Path {} cells, cleared {}, score {}",
        outcome.path.len(),
        outcome.cleared.len(),
        score
    );
    if outcome.gained > 0 {
        s.push_str(&format!(" (+{})", outcome.gained));
    }
    if !outcome.spawned.is_empty() {
        let spawned: Vec<String> = outcome
            .spawned
            .iter()
            .map(|(idx, color)| format!("{}{}", color.symbol(), format_position(*idx)))
            .collect();
        s.push_str(&format!(", spawned {}", spawned.join(" ")));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use line98_engine::cells::Color;

    #[test]
    fn board_has_header_and_nine_rows() {
        let mut board = Board::empty();
        board.place(80, Color::Magenta);
        let grid = format_board(&board);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE + 1);
        assert_eq!(lines[0], "   0 1 2 3 4 5 6 7 8");
        assert!(lines[9].starts_with(" 8"));
        assert!(lines[9].ends_with('M'));
    }

    #[test]
    fn empty_cell_glyph() {
        let glyph = format_cell(Cell::Empty);
        assert!(glyph == '·' || glyph == '.');
        assert_eq!(format_cell(Cell::Ball(Color::Cyan)), 'C');
    }

    #[test]
    fn queue_and_positions() {
        let queue = SpawnQueue::new([Color::Red, Color::Green, Color::Blue]);
        assert_eq!(format_queue(&queue), "R G B");
        assert_eq!(format_position(10), "(1,1)");
    }

    #[test]
    fn hint_line() {
        let hint = Hint {
            from: 3,
            to: 4,
            score: 500,
            class: MoveClass::Clear,
        };
        assert_eq!(format_hint(&hint), "3 (0,3) -> 4 (0,4)  score 500 (clear)");
    }

    #[test]
    fn outcome_line_mentions_gain_and_spawns() {
        let cleared = MoveOutcome {
            path: vec![0, 1, 2],
            cleared: vec![1, 2, 3, 4, 5],
            spawned: Vec::new(),
            gained: 5,
            finished: false,
        };
        assert_eq!(
            format_outcome(&cleared, 5),
            "Path 3 cells, cleared 5, score 5 (+5)"
        );

        let spawned = MoveOutcome {
            path: vec![0, 1],
            cleared: Vec::new(),
            spawned: vec![(9, Color::Yellow)],
            gained: 0,
            finished: false,
        };
        assert_eq!(
            format_outcome(&spawned, 0),
            "Path 2 cells, cleared 0, score 0, spawned Y(1,0)"
        );
    }
}
