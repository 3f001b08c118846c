use thiserror::Error;

/// Reasons a move request is not applied.
///
/// Every variant except [`MoveError::BoardFull`] is a rejection raised before
/// the session is touched. `BoardFull` is raised after the ball has already
/// moved; the session is left `Finished` with that move applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Game already finished")]
    GameFinished,
    #[error("Cell index {index} is off the board")]
    OutOfRange { index: usize },
    #[error("Source and destination are the same cell ({index})")]
    SelfMove { index: usize },
    #[error("No ball at source cell {index}")]
    EmptySource { index: usize },
    #[error("Destination cell {index} is not empty")]
    OccupiedDestination { index: usize },
    #[error("No open path from {from} to {to}")]
    NoPath { from: usize, to: usize },
    #[error("Board full: {needed} free cells needed to spawn, {available} available")]
    BoardFull { needed: usize, available: usize },
}

impl MoveError {
    /// True when the error ended the game (the session was mutated).
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveError::BoardFull { .. })
    }

    /// True when the caller can correct the request and retry.
    pub fn is_client_error(&self) -> bool {
        !self.is_terminal()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Expected {expected} symbols, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("Invalid symbol {symbol:?} at position {index}")]
    InvalidSymbol { index: usize, symbol: char },
}
