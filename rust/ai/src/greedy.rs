//! Greedy one-move-ahead advisor.
//!
//! Every legal `(from, to)` pair is simulated on a copy of the board and
//! scored in three tiers: moves that clear a run, moves that leave some color
//! four in a row after a simulated spawn, and everything else. The tier
//! ordering is the contract; the weights inside [`HintWeights`] are tunable.

use line98_engine::game::{Session, SpawnQueue};
use line98_engine::grid::{Board, TOTAL_CELLS};
use line98_engine::lines::find_clearable_set;
use line98_engine::path::reachable_cells;
use line98_engine::spawner::{count_potential_lines, Spawner};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{AdvisorError, Hint, HintAdvisor, MoveClass};

/// Score multipliers for each move class.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HintWeights {
    /// Points per ball a move clears.
    pub clear: u32,
    /// Points per four-in-a-row window after the simulated spawn.
    pub potential: u32,
    /// Flat score for any other legal move.
    pub movable: u32,
}

impl Default for HintWeights {
    fn default() -> Self {
        Self {
            clear: 100,
            potential: 10,
            movable: 1,
        }
    }
}

impl HintWeights {
    /// Requires `clear > potential > movable > 0`.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.movable == 0 {
            return Err(AdvisorError::InvalidWeights(
                "movable weight must be positive".to_string(),
            ));
        }
        if self.potential <= self.movable {
            return Err(AdvisorError::InvalidWeights(format!(
                "potential weight {} must exceed movable weight {}",
                self.potential, self.movable
            )));
        }
        if self.clear <= self.potential {
            return Err(AdvisorError::InvalidWeights(format!(
                "clear weight {} must exceed potential weight {}",
                self.clear, self.potential
            )));
        }
        Ok(())
    }
}

/// Greedy advisor over all reachable moves.
///
/// The simulated spawn is driven by a generator seeded from the advisor
/// seed and the board contents, so repeated calls on the same session agree.
///
/// # Example
///
/// ```rust
/// use line98_ai::greedy::GreedyAdvisor;
/// use line98_ai::HintAdvisor;
/// use line98_engine::engine::Engine;
///
/// let advisor = GreedyAdvisor::new();
/// let session = Engine::new(Some(3)).create_session("p");
///
/// assert_eq!(advisor.suggest(&session), advisor.suggest(&session));
/// ```
#[derive(Debug, Clone)]
pub struct GreedyAdvisor {
    weights: HintWeights,
    seed: u64,
}

impl Default for GreedyAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyAdvisor {
    pub fn new() -> Self {
        Self {
            weights: HintWeights::default(),
            seed: 0,
        }
    }

    pub fn with_weights(weights: HintWeights) -> Result<Self, AdvisorError> {
        weights.validate()?;
        Ok(Self { weights, seed: 0 })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn weights(&self) -> HintWeights {
        self.weights
    }

    fn score_move(
        &self,
        board: &Board,
        queue: &SpawnQueue,
        from: usize,
        to: usize,
        spawner: &mut Spawner<ChaCha20Rng>,
    ) -> Hint {
        let mut simulated = board.clone();
        simulated.move_ball(from, to);

        let cleared = find_clearable_set(&simulated).len() as u32;
        if cleared > 0 {
            return Hint {
                from,
                to,
                score: cleared.saturating_mul(self.weights.clear),
                class: MoveClass::Clear,
            };
        }

        let potential = match spawner.place_queued(&mut simulated, queue.colors()) {
            Some(_) => count_potential_lines(&simulated),
            None => 0,
        };
        if potential > 0 {
            Hint {
                from,
                to,
                score: potential.saturating_mul(self.weights.potential),
                class: MoveClass::PotentialLine,
            }
        } else {
            Hint {
                from,
                to,
                score: self.weights.movable,
                class: MoveClass::Movable,
            }
        }
    }
}

impl HintAdvisor for GreedyAdvisor {
    fn rank_candidates(&self, session: &Session) -> Vec<Hint> {
        let board = session.board();
        let queue = session.spawn_queue();
        let seed = self.seed ^ board_fingerprint(board, queue);
        let mut spawner = Spawner::from_rng(ChaCha20Rng::seed_from_u64(seed));

        let mut candidates = Vec::new();
        for from in (0..TOTAL_CELLS).filter(|&i| !board.is_empty_at(i)) {
            for to in reachable_cells(board, from) {
                candidates.push(self.score_move(board, queue, from, to, &mut spawner));
            }
        }
        tracing::debug!(
            candidates = candidates.len(),
            score = session.score(),
            "ranked hint candidates"
        );
        candidates
    }

    fn name(&self) -> &str {
        "GreedyAdvisor"
    }
}

/// FNV-1a hash of the board and queue symbols.
pub fn board_fingerprint(board: &Board, queue: &SpawnQueue) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    board
        .to_string()
        .bytes()
        .chain(queue.to_string().bytes())
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
