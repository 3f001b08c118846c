//! `line98 play`: interactive game on the terminal.
//!
//! Input is read line by line so the loop can be driven from a pipe or a
//! test buffer as well as a TTY. A rejected move leaves the game unchanged
//! and the prompt comes back; the loop ends on game over, `quit`, or end of
//! input.

use crate::error::CliError;
use crate::formatters::{format_board, format_hint, format_outcome, format_queue};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_play_input, ParseResult};
use line98_ai::create_advisor;
use line98_engine::engine::Engine;
use line98_engine::game::Session;
use std::io::{BufRead, Write};

pub fn handle_play_command(
    seed: Option<u64>,
    advisor: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let advisor = create_advisor(advisor)?;
    let mut engine = Engine::new(seed);
    let mut session = engine.create_session("local");

    if let Some(s) = engine.seed() {
        writeln!(out, "Seed: {}", s)?;
    }
    write_state(out, &session)?;

    loop {
        if session.is_finished() {
            writeln!(out, "Game over. Final score: {}", session.score())?;
            break;
        }
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(input) else {
            writeln!(out, "Input closed. Score: {}", session.score())?;
            break;
        };
        if line.is_empty() {
            continue;
        }

        match parse_play_input(&line) {
            ParseResult::Quit => {
                writeln!(out, "Quit. Score: {}", session.score())?;
                break;
            }
            ParseResult::Hint => match advisor.suggest(&session) {
                Some(hint) => writeln!(out, "Hint: {}", format_hint(&hint))?,
                None => writeln!(out, "No move available")?,
            },
            ParseResult::Move { from, to } => match engine.apply_move(&mut session, from, to) {
                Ok(outcome) => {
                    writeln!(out, "{}", format_outcome(&outcome, session.score()))?;
                    write_state(out, &session)?;
                }
                Err(e) if e.is_terminal() => {
                    // the move itself was committed before the spawn ran short
                    ui::write_error(err, &e.to_string())?;
                    write_state(out, &session)?;
                }
                Err(e) => ui::write_error(err, &e.to_string())?,
            },
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
    Ok(())
}

fn write_state(out: &mut dyn Write, session: &Session) -> Result<(), CliError> {
    write!(out, "{}", format_board(session.board()))?;
    writeln!(
        out,
        "Next: {}  Score: {}",
        format_queue(session.spawn_queue()),
        session.score()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(seed: u64, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        handle_play_command(Some(seed), "greedy", &mut out, &mut err, &mut input).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn quit_ends_the_game() {
        let (out, err) = play(1, "q\n");
        assert!(out.contains("Quit. Score: 0"));
        assert!(err.is_empty());
    }

    #[test]
    fn hint_then_eof() {
        let (out, _) = play(2, "hint\n");
        assert!(out.contains("Hint: "));
        assert!(out.contains("Input closed"));
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let (out, err) = play(3, "jump\n4,4 4,4\nquit\n");
        assert!(err.contains("Error: Unrecognized input"));
        assert!(err.lines().count() >= 2);
        assert!(out.contains("Quit."));
    }

    #[test]
    fn unknown_advisor_fails_before_play() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new(Vec::new());
        let result = handle_play_command(Some(1), "oracle", &mut out, &mut err, &mut input);
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(out.is_empty());
    }
}
