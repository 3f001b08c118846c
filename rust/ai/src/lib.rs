//! # line98-ai: Move Advisors for Line98
//!
//! Suggests a move for a session without touching it. Advisors share the
//! [`HintAdvisor`] interface and are created by name through
//! [`create_advisor`].
//!
//! ## Core Components
//!
//! - [`HintAdvisor`] - Trait implemented by every advisor
//! - [`greedy`] - Single-move greedy advisor with tunable weights
//! - [`create_advisor`] - Factory for advisors by name
//!
//! ## Quick Start
//!
//! ```rust
//! use line98_ai::{create_advisor, HintAdvisor};
//! use line98_engine::engine::Engine;
//!
//! let advisor = create_advisor("greedy").expect("known advisor");
//!
//! let mut engine = Engine::new(Some(42));
//! let session = engine.create_session("player-1");
//!
//! let hint = advisor.suggest(&session).expect("fresh game has moves");
//! assert!(session.board().color_at(hint.from).is_some());
//! assert!(session.board().is_empty_at(hint.to));
//! ```
//!
//! ## Advisor Types
//!
//! - `"greedy"` - Scores every legal move one step ahead

use line98_engine::game::Session;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod greedy;

/// How a candidate move earned its score.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveClass {
    /// The move completes at least one clearable run.
    Clear,
    /// After the move and a simulated spawn, some color has four in a row.
    PotentialLine,
    /// Legal, with nothing better to say about it.
    Movable,
}

/// A suggested move and its heuristic score.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub from: usize,
    pub to: usize,
    pub score: u32,
    pub class: MoveClass,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("Unknown advisor: {0}")]
    Unknown(String),
    #[error("Invalid hint weights: {0}")]
    InvalidWeights(String),
}

/// Trait defining the interface for move advisors.
///
/// Implementations must be pure: the same session always yields the same
/// candidates, and the session is only ever borrowed immutably.
///
/// # Example Implementation
///
/// ```rust
/// use line98_ai::{Hint, HintAdvisor, MoveClass};
/// use line98_engine::game::Session;
///
/// struct FirstBall;
///
/// impl HintAdvisor for FirstBall {
///     fn rank_candidates(&self, session: &Session) -> Vec<Hint> {
///         let board = session.board();
///         let from = (0..81).find(|&i| !board.is_empty_at(i));
///         let to = (0..81).find(|&i| board.is_empty_at(i));
///         match (from, to) {
///             (Some(from), Some(to)) => vec![Hint { from, to, score: 1, class: MoveClass::Movable }],
///             _ => Vec::new(),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "FirstBall"
///     }
/// }
/// ```
pub trait HintAdvisor: Send + Sync {
    /// Every candidate move with its score, in the advisor's search order.
    fn rank_candidates(&self, session: &Session) -> Vec<Hint>;

    /// Return the name/identifier of this advisor.
    fn name(&self) -> &str;

    /// Best candidate, or `None` for a finished session or when no ball can
    /// move. On equal scores the earliest candidate wins.
    fn suggest(&self, session: &Session) -> Option<Hint> {
        if session.is_finished() {
            return None;
        }
        best_of(self.rank_candidates(session))
    }
}

/// First candidate with the highest score.
pub fn best_of(candidates: impl IntoIterator<Item = Hint>) -> Option<Hint> {
    candidates.into_iter().fold(None, |best, hint| match best {
        Some(current) if current.score >= hint.score => Some(current),
        _ => Some(hint),
    })
}

/// Factory function to create advisors by type string.
///
/// ```rust
/// use line98_ai::{create_advisor, AdvisorError};
///
/// let advisor = create_advisor("greedy").unwrap();
/// assert_eq!(advisor.name(), "GreedyAdvisor");
///
/// assert!(matches!(create_advisor("oracle"), Err(AdvisorError::Unknown(_))));
/// ```
pub fn create_advisor(advisor_type: &str) -> Result<Box<dyn HintAdvisor>, AdvisorError> {
    create_advisor_with_seed(advisor_type, 0)
}

/// Like [`create_advisor`], with the seed that drives simulated spawns.
pub fn create_advisor_with_seed(
    advisor_type: &str,
    seed: u64,
) -> Result<Box<dyn HintAdvisor>, AdvisorError> {
    match advisor_type {
        "greedy" => Ok(Box::new(greedy::GreedyAdvisor::new().with_seed(seed))),
        other => Err(AdvisorError::Unknown(other.to_string())),
    }
}
