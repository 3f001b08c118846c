//! `line98 hint`: advisor output for a board given on the command line.

use crate::error::CliError;
use crate::formatters::{format_board, format_hint};
use line98_ai::create_advisor_with_seed;
use line98_engine::game::{GameStatus, OwnerId, Session, SpawnQueue};
use line98_engine::grid::Board;
use std::io::Write;

/// Parses `board` and `next`, then prints the best hint.
///
/// With `all`, every candidate is listed first in the advisor's search order.
/// A board that can make no progress is reported as finished, not as an error.
pub fn handle_hint_command(
    board: &str,
    next: &str,
    all: bool,
    advisor: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let board: Board = board
        .parse()
        .map_err(|e| CliError::InvalidInput(format!("--board: {}", e)))?;
    let queue: SpawnQueue = next
        .parse()
        .map_err(|e| CliError::InvalidInput(format!("--next: {}", e)))?;
    let advisor = create_advisor_with_seed(advisor, 0)?;
    let session = Session::from_parts(
        OwnerId::new("local"),
        board,
        queue,
        0,
        GameStatus::InProgress,
    );

    write!(out, "{}", format_board(session.board()))?;
    if all {
        let candidates = advisor.rank_candidates(&session);
        writeln!(out, "Candidates: {}", candidates.len())?;
        for hint in &candidates {
            writeln!(out, "  {}", format_hint(hint))?;
        }
    }
    if session.is_finished() {
        writeln!(out, "Game over: no empty cell left")?;
        return Ok(());
    }
    match advisor.suggest(&session) {
        Some(hint) => writeln!(out, "Best: {}", format_hint(&hint))?,
        None => writeln!(out, "No move available")?,
    }
    Ok(())
}
