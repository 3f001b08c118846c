use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::cells::Color;
use crate::errors::CodecError;
use crate::grid::{Board, SPAWN_COUNT};
use crate::lines::find_clearable_set;

/// Lifecycle of a session. The only transition is `InProgress -> Finished`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// Opaque reference to the owning identity; used for authorization only.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The balls that appear on the next non-clearing move, in placement order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnQueue([Color; SPAWN_COUNT]);

impl SpawnQueue {
    pub fn new(colors: [Color; SPAWN_COUNT]) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl fmt::Debug for SpawnQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SpawnQueue").field(&self.to_string()).finish()
    }
}

impl fmt::Display for SpawnQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.0 {
            write!(f, "{}", color.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for SpawnQueue {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actual = s.chars().count();
        if actual != SPAWN_COUNT {
            return Err(CodecError::Length {
                expected: SPAWN_COUNT,
                actual,
            });
        }
        let mut colors = [Color::Red; SPAWN_COUNT];
        for (index, symbol) in s.chars().enumerate() {
            colors[index] =
                Color::from_symbol(symbol).ok_or(CodecError::InvalidSymbol { index, symbol })?;
        }
        Ok(Self(colors))
    }
}

impl Serialize for SpawnQueue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpawnQueue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One puzzle game instance.
///
/// Only [`crate::engine::Engine`] mutates a session. Its board and queue
/// lengths are fixed by their types; `score` never decreases and `status`
/// never returns to `InProgress` once finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    pub(crate) owner_id: OwnerId,
    pub(crate) board: Board,
    pub(crate) spawn_queue: SpawnQueue,
    pub(crate) score: u32,
    pub(crate) status: GameStatus,
}

impl Session {
    /// Rebuild a session from its stored parts.
    ///
    /// A board with no empty cells and nothing to clear cannot make progress,
    /// so such a session is always loaded as `Finished`.
    pub fn from_parts(
        owner_id: OwnerId,
        board: Board,
        spawn_queue: SpawnQueue,
        score: u32,
        status: GameStatus,
    ) -> Self {
        let status = if is_stalled(&board) {
            GameStatus::Finished
        } else {
            status
        };
        Self {
            owner_id,
            board,
            spawn_queue,
            score,
            status,
        }
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn spawn_queue(&self) -> &SpawnQueue {
        &self.spawn_queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner_id == owner
    }

    pub(crate) fn finish(&mut self) {
        self.status = GameStatus::Finished;
    }
}

/// A full board with no clearable run; no move can progress the game.
pub fn is_stalled(board: &Board) -> bool {
    board.is_full() && find_clearable_set(board).is_empty()
}

/// Persisted shape of a [`Session`]: board and queue as symbol strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub owner_id: OwnerId,
    pub board: Board,
    pub next_balls: SpawnQueue,
    pub score: u32,
    pub status: GameStatus,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Session::from_parts(
            record.owner_id,
            record.board,
            record.next_balls,
            record.score,
            record.status,
        )
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        SessionRecord {
            owner_id: session.owner_id,
            board: session.board,
            next_balls: session.spawn_queue,
            score: session.score,
            status: session.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_queue_parses_symbols() {
        let queue: SpawnQueue = "RGB".parse().expect("parse");
        assert_eq!(queue.colors(), &[Color::Red, Color::Green, Color::Blue]);
        assert_eq!(queue.to_string(), "RGB");
    }

    #[test]
    fn spawn_queue_rejects_bad_input() {
        assert_eq!(
            "RG".parse::<SpawnQueue>(),
            Err(CodecError::Length {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            "R-B".parse::<SpawnQueue>(),
            Err(CodecError::InvalidSymbol {
                index: 1,
                symbol: '-'
            })
        );
    }

    #[test]
    fn status_serializes_in_upper_snake_case() {
        let json = serde_json::to_string(&GameStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"IN_PROGRESS\"");
        let json = serde_json::to_string(&GameStatus::Finished).expect("serialize");
        assert_eq!(json, "\"FINISHED\"");
    }

    #[test]
    fn stalled_board_loads_as_finished() {
        // Alternating colors so no run reaches five.
        let mut board = Board::empty();
        for idx in 0..crate::grid::TOTAL_CELLS {
            let (row, col) = crate::grid::to_coord(idx);
            let color = Color::ALL[(row * 3 + col) % Color::ALL.len()];
            board.place(idx, color);
        }
        assert!(find_clearable_set(&board).is_empty());
        let session = Session::from_parts(
            OwnerId::new("u1"),
            board,
            "RRR".parse().expect("queue"),
            10,
            GameStatus::InProgress,
        );
        assert!(session.is_finished());
    }
}
