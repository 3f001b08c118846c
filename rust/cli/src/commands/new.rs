//! `line98 new`: start a game and show its initial state.

use crate::error::CliError;
use crate::formatters::{format_board, format_queue};
use line98_engine::engine::Engine;
use std::io::Write;

/// Prints the seed, the board grid, the spawn queue and the board string.
///
/// The board string is the persisted 81-symbol form and can be passed to
/// `line98 hint --board` together with the `Next` letters.
pub fn handle_new_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let mut engine = Engine::new(seed);
    let session = engine.create_session("local");

    if let Some(s) = engine.seed() {
        writeln!(out, "Seed: {}", s)?;
    }
    write!(out, "{}", format_board(session.board()))?;
    writeln!(out, "Next: {}", format_queue(session.spawn_queue()))?;
    writeln!(out, "Board: {}", session.board())?;
    writeln!(out, "Queue: {}", session.spawn_queue())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_value(output: &str, prefix: &str) -> String {
        output
            .lines()
            .find_map(|l| l.strip_prefix(prefix))
            .unwrap_or_else(|| panic!("missing {prefix}"))
            .to_string()
    }

    #[test]
    fn prints_a_fresh_game() {
        let mut out = Vec::new();
        handle_new_command(Some(5), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(line_value(&output, "Seed: "), "5");
        let board = line_value(&output, "Board: ");
        assert_eq!(board.len(), 81);
        assert_eq!(board.chars().filter(|&c| c != '-').count(), 5);
        assert_eq!(line_value(&output, "Queue: ").len(), 3);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_new_command(Some(77), &mut a).unwrap();
        handle_new_command(Some(77), &mut b).unwrap();
        assert_eq!(a, b);
    }
}
