//! `line98 stats`: aggregate simulation logs.
//!
//! Input is one JSONL file or a directory searched recursively for
//! `*.jsonl` and `*.jsonl.zst`. A line that is not a [`GameRecord`] counts as
//! corrupted, except a final line with no trailing newline, which is treated
//! as an interrupted write and counted as skipped. Records whose move scores
//! go down, or whose final score disagrees with the last move, fail the run.

use crate::error::{BatchValidationError, CliError};
use crate::io_utils::{is_log_file, read_text_auto};
use crate::ui;
use line98_engine::logger::GameRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct StatsSummary {
    pub games: u64,
    pub total_score: u64,
    pub mean_score: f64,
    pub max_score: u32,
    pub mean_moves: f64,
    pub corrupted: u64,
    pub skipped: u64,
}

#[derive(Default)]
struct StatsState {
    games: u64,
    total_score: u64,
    max_score: u32,
    total_moves: u64,
    corrupted: u64,
    skipped: u64,
    stats_ok: bool,
}

impl StatsState {
    fn summary(&self) -> StatsSummary {
        let per_game = |v: u64| {
            if self.games == 0 {
                0.0
            } else {
                v as f64 / self.games as f64
            }
        };
        StatsSummary {
            games: self.games,
            total_score: self.total_score,
            mean_score: per_game(self.total_score),
            max_score: self.max_score,
            mean_moves: per_game(self.total_moves),
            corrupted: self.corrupted,
            skipped: self.skipped,
        }
    }
}

pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState {
        stats_ok: true,
        ..StatsState::default()
    };

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(dir) = stack.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            let mut files: Vec<_> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
            files.sort();
            for p in files {
                if p.is_dir() {
                    stack.push(p);
                } else if is_log_file(&p) {
                    match read_text_auto(&p) {
                        Ok(content) => consume(&content, &p.display().to_string(), &mut state, err)?,
                        Err(e) => {
                            ui::display_warning(
                                err,
                                &format!("Cannot read {}: {}", p.display(), e),
                            )?;
                            state.corrupted += 1;
                        }
                    }
                }
            }
        }
    } else {
        match read_text_auto(path) {
            Ok(content) => consume(&content, input, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.games == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "No valid game record")?;
        return Err(CliError::InvalidInput("No valid game record".to_string()));
    }

    let json_output = serde_json::to_string_pretty(&state.summary())
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}

fn consume(
    content: &str,
    source: &str,
    state: &mut StatsState,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let has_trailing_nl = content.ends_with('\n');
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();

    for (pos, (line_no, line)) in lines.iter().enumerate() {
        let record: GameRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) => {
                if pos == lines.len() - 1 && !has_trailing_nl {
                    state.skipped += 1;
                } else {
                    state.corrupted += 1;
                }
                continue;
            }
        };

        if let Some(message) = score_inconsistency(&record) {
            state.stats_ok = false;
            let problem = BatchValidationError {
                item_context: format!("{}:{}", source, line_no + 1),
                message,
            };
            ui::write_error(err, &problem.to_string())?;
            continue;
        }

        state.games += 1;
        state.total_score += u64::from(record.final_score);
        state.max_score = state.max_score.max(record.final_score);
        state.total_moves += record.moves.len() as u64;
    }
    Ok(())
}

fn score_inconsistency(record: &GameRecord) -> Option<String> {
    for pair in record.moves.windows(2) {
        if pair[1].score < pair[0].score {
            return Some(format!(
                "game {} score decreased from {} to {} at move {}",
                record.game_id, pair[0].score, pair[1].score, pair[1].seq
            ));
        }
    }
    match record.moves.last() {
        Some(last) if last.score != record.final_score => Some(format!(
            "game {} final score {} does not match last move score {}",
            record.game_id, record.final_score, last.score
        )),
        _ => None,
    }
}
