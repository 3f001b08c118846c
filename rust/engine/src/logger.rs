use serde::{Deserialize, Serialize};

use crate::cells::Color;
use crate::engine::MoveOutcome;
use crate::game::{GameStatus, Session};
use crate::grid::Board;

/// One accepted move, as written to a game log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Identifier of the game this move belongs to
    pub game_id: String,
    /// 1-based position of the move within the game
    pub seq: u32,
    pub from: usize,
    pub to: usize,
    /// Route the ball took, both endpoints included
    pub path: Vec<usize>,
    /// Cells cleared after the move or after the spawn
    pub cleared: Vec<usize>,
    /// Balls placed from the queue this turn
    pub spawned: Vec<(usize, Color)>,
    /// Session score after the move
    pub score: u32,
    pub status: GameStatus,
    /// Timestamp when the move was logged (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl MoveRecord {
    pub fn from_outcome(
        game_id: &str,
        seq: u32,
        from: usize,
        to: usize,
        outcome: &MoveOutcome,
        session: &Session,
    ) -> Self {
        Self {
            game_id: game_id.to_string(),
            seq,
            from,
            to,
            path: outcome.path.clone(),
            cleared: outcome.cleared.clone(),
            spawned: outcome.spawned.clone(),
            score: session.score(),
            status: session.status(),
            ts: None,
        }
    }
}

/// Complete record of one game, serialized as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Spawner seed (enables deterministic replay)
    pub seed: Option<u64>,
    pub moves: Vec<MoveRecord>,
    pub final_score: u32,
    /// Board at the end of the game, as its 81-symbol string
    pub final_board: Board,
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSONL writer for [`GameRecord`]s.
pub struct GameLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl GameLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers games from a fixed date and writes nowhere.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
