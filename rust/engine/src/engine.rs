use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cells::Color;
use crate::errors::MoveError;
use crate::game::{is_stalled, GameStatus, OwnerId, Session};
use crate::grid::{Board, INITIAL_BALLS, SPAWN_COUNT};
use crate::lines::clear_lines;
use crate::path::find_path;
use crate::rules::validate_move;
use crate::spawner::Spawner;

/// What an accepted move did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Route the ball took, both endpoints included.
    pub path: Vec<usize>,
    /// Cells cleared this move, ascending.
    pub cleared: Vec<usize>,
    /// Balls placed from the spawn queue (empty when the move cleared a line).
    pub spawned: Vec<(usize, Color)>,
    /// Points added to the score.
    pub gained: u32,
    /// True when this move ended the game.
    pub finished: bool,
}

/// Orchestrates move validation, clearing and spawning for sessions.
///
/// The engine owns the random source used for spawning; sessions themselves
/// are plain data and can be stored and reloaded between moves.
///
/// # Examples
///
/// ```
/// use line98_engine::engine::Engine;
/// use line98_engine::game::GameStatus;
/// use line98_engine::grid::INITIAL_BALLS;
///
/// let mut engine = Engine::new(Some(12345));
/// let session = engine.create_session("player-1");
///
/// assert_eq!(session.board().ball_count(), INITIAL_BALLS);
/// assert_eq!(session.score(), 0);
/// assert_eq!(session.status(), GameStatus::InProgress);
/// ```
#[derive(Debug)]
pub struct Engine<R = ChaCha20Rng> {
    spawner: Spawner<R>,
    seed: Option<u64>,
}

impl Engine<ChaCha20Rng> {
    /// Seeded engine; a random seed is drawn when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            spawner: Spawner::new_with_seed(seed),
            seed: Some(seed),
        }
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_spawner(spawner: Spawner<R>) -> Self {
        Self {
            spawner,
            seed: None,
        }
    }

    /// Seed the spawner was built from, if it was built from one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn create_session(&mut self, owner: impl Into<OwnerId>) -> Session {
        let mut board = Board::empty();
        self.spawner.place_random(&mut board, INITIAL_BALLS);
        let spawn_queue = self.spawner.next_queue();
        Session {
            owner_id: owner.into(),
            board,
            spawn_queue,
            score: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Apply a move: validate, route, clear, and spawn when nothing cleared.
    ///
    /// Rejections (`GameFinished`, `OutOfRange`, `SelfMove`, `EmptySource`,
    /// `OccupiedDestination`, `NoPath`) leave the session untouched.
    ///
    /// [`MoveError::BoardFull`] is different: it is returned *after* the ball
    /// has moved. The session keeps that move, keeps its spawn queue and is
    /// marked `Finished`. Callers must persist the session even though the
    /// call returned an error; there is no rollback.
    ///
    /// A successful move can also end the game, when the board ends up full
    /// with nothing to clear; `MoveOutcome::finished` reports that case.
    pub fn apply_move(
        &mut self,
        session: &mut Session,
        from: usize,
        to: usize,
    ) -> Result<MoveOutcome, MoveError> {
        let mv = validate_move(session, from, to)?;
        let path = find_path(&session.board, mv.from, mv.to).ok_or(MoveError::NoPath { from, to })?;

        session.board.move_ball(mv.from, mv.to);

        let mut outcome = MoveOutcome {
            path,
            cleared: Vec::new(),
            spawned: Vec::new(),
            gained: 0,
            finished: false,
        };

        let after_move = clear_lines(&session.board);
        if after_move.cleared_count() > 0 {
            session.board = after_move.board;
            outcome.cleared = after_move.cleared;
        } else {
            let queue = session.spawn_queue;
            let Some(spawned) = self
                .spawner
                .place_queued(&mut session.board, queue.colors())
            else {
                let available = session.board.empty_count();
                session.finish();
                tracing::info!(
                    owner = %session.owner_id,
                    score = session.score,
                    available,
                    "board full on spawn, game over"
                );
                return Err(MoveError::BoardFull {
                    needed: SPAWN_COUNT,
                    available,
                });
            };
            let after_spawn = clear_lines(&session.board);
            session.board = after_spawn.board;
            outcome.cleared = after_spawn.cleared;
            outcome.spawned = spawned;
            session.spawn_queue = self.spawner.next_queue();
        }

        outcome.gained = outcome.cleared.len() as u32;
        session.score = session.score.saturating_add(outcome.gained);

        if is_stalled(&session.board) {
            session.finish();
            outcome.finished = true;
            tracing::info!(
                owner = %session.owner_id,
                score = session.score,
                "board full with no clearable line, game over"
            );
        }

        tracing::debug!(
            from,
            to,
            color = %mv.color,
            path_len = outcome.path.len(),
            cleared = outcome.gained,
            spawned = outcome.spawned.len(),
            score = session.score,
            "move applied"
        );

        Ok(outcome)
    }
}
