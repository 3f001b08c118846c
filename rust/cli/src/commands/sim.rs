//! `line98 sim`: autoplay games by always taking the advisor's hint.
//!
//! Game `i` of a run is seeded with `base_seed + i`, so any game can be
//! replayed on its own with `line98 play --seed`. With `--output`, each game
//! becomes one [`GameRecord`] line of JSONL.
//!
//! # Environment Variables
//!
//! - `LINE98_SIM_BREAK_AFTER`: stop after N games as if interrupted (exit 130)

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use line98_ai::{create_advisor, HintAdvisor};
use line98_engine::engine::Engine;
use line98_engine::logger::{GameLogger, GameRecord, MoveRecord};
use std::io::Write;
use std::path::Path;

pub const BREAK_AFTER_ENV: &str = "LINE98_SIM_BREAK_AFTER";

pub fn handle_sim_command(
    games: u64,
    seed: Option<u64>,
    output: Option<String>,
    max_moves: u32,
    advisor: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let advisor = create_advisor(advisor)?;
    let base_seed = seed.unwrap_or_else(rand::random);

    let mut logger = match output.as_deref().map(Path::new) {
        Some(path) => {
            ensure_parent_dir(path)?;
            Some(GameLogger::create(path).map_err(|e| {
                CliError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to open {}: {}", path.display(), e),
                ))
            })?)
        }
        None => None,
    };
    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut completed = 0u64;
    let mut total_score = 0u64;
    let mut max_score = 0u32;
    let mut total_moves = 0u64;

    for i in 0..games {
        let game_id = match logger.as_mut() {
            Some(l) => l.next_id(),
            None => format!("game-{:06}", i + 1),
        };
        let record = play_game(game_id, base_seed.wrapping_add(i), advisor.as_ref(), max_moves)?;
        if let Some(l) = logger.as_mut() {
            l.write(&record)?;
        }

        completed += 1;
        total_score += u64::from(record.final_score);
        max_score = max_score.max(record.final_score);
        total_moves += record.moves.len() as u64;

        if let Some(b) = break_after
            && completed == b
            && completed < games
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, games)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                completed, games
            )));
        }
    }

    writeln!(out, "Simulated: {} games (base seed {})", completed, base_seed)?;
    writeln!(
        out,
        "Mean score: {:.2}  Max score: {}  Mean moves: {:.2}",
        total_score as f64 / completed as f64,
        max_score,
        total_moves as f64 / completed as f64
    )?;
    Ok(())
}

/// Plays one game to the end or to `max_moves` accepted moves.
///
/// A move that fills the board is committed by the engine but yields no
/// outcome, so it ends the game without a move record.
pub fn play_game(
    game_id: String,
    seed: u64,
    advisor: &dyn HintAdvisor,
    max_moves: u32,
) -> Result<GameRecord, CliError> {
    let mut engine = Engine::new(Some(seed));
    let mut session = engine.create_session("sim");
    let mut moves = Vec::new();

    while moves.len() < max_moves as usize {
        let Some(hint) = advisor.suggest(&session) else {
            break;
        };
        match engine.apply_move(&mut session, hint.from, hint.to) {
            Ok(outcome) => {
                let seq = moves.len() as u32 + 1;
                moves.push(MoveRecord::from_outcome(
                    &game_id, seq, hint.from, hint.to, &outcome, &session,
                ));
                if outcome.finished {
                    break;
                }
            }
            Err(e) if e.is_terminal() => {
                tracing::debug!(game_id = %game_id, error = %e, "simulated game ended");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(GameRecord {
        game_id,
        seed: Some(seed),
        moves,
        final_score: session.score(),
        final_board: session.board().clone(),
        ts: None,
    })
}
