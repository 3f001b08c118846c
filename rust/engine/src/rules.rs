use crate::cells::Color;
use crate::errors::MoveError;
use crate::game::Session;
use crate::grid::is_valid_index;

/// A move that passed the input checks; path existence is checked next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    pub from: usize,
    pub to: usize,
    pub color: Color,
}

/// Validates a move request against the session before anything is mutated.
///
/// Checks run in a fixed order so the reported reason is stable:
/// finished game, indices on the board, self-move, empty source, occupied
/// destination.
///
/// # Errors
///
/// - [`MoveError::GameFinished`] - the session no longer accepts moves
/// - [`MoveError::OutOfRange`] - either index is off the board
/// - [`MoveError::SelfMove`] - `from == to`
/// - [`MoveError::EmptySource`] - no ball at `from`
/// - [`MoveError::OccupiedDestination`] - `to` already holds a ball
///
/// # Examples
///
/// ```
/// use line98_engine::engine::Engine;
/// use line98_engine::errors::MoveError;
/// use line98_engine::rules::validate_move;
///
/// let mut engine = Engine::new(Some(1));
/// let session = engine.create_session("player-1");
///
/// let result = validate_move(&session, 0, 500);
/// assert!(matches!(result, Err(MoveError::OutOfRange { index: 500 })));
///
/// let result = validate_move(&session, 4, 4);
/// assert!(matches!(result, Err(MoveError::SelfMove { index: 4 })));
/// ```
pub fn validate_move(session: &Session, from: usize, to: usize) -> Result<ValidatedMove, MoveError> {
    if session.is_finished() {
        return Err(MoveError::GameFinished);
    }
    for index in [from, to] {
        if !is_valid_index(index) {
            return Err(MoveError::OutOfRange { index });
        }
    }
    if from == to {
        return Err(MoveError::SelfMove { index: from });
    }
    let board = session.board();
    let color = board
        .color_at(from)
        .ok_or(MoveError::EmptySource { index: from })?;
    if !board.is_empty_at(to) {
        return Err(MoveError::OccupiedDestination { index: to });
    }
    Ok(ValidatedMove { from, to, color })
}
