//! Multi-axis run detection and clearing.
//!
//! Every filled cell is scanned along the four axes in both directions. Runs
//! of at least [`MIN_LINE`] same-colored balls are merged into one clear-set,
//! so a ball shared by two runs is cleared (and scored) once.

use std::collections::BTreeSet;

use crate::grid::{step, Axis, Board, MIN_LINE, TOTAL_CELLS};

/// Result of a clear pass: the board with every clearable ball removed, and
/// the cleared indices in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    pub board: Board,
    pub cleared: Vec<usize>,
}

impl ClearOutcome {
    pub fn cleared_count(&self) -> usize {
        self.cleared.len()
    }
}

/// Maximal same-colored run through `index` along `axis`, in board order.
/// Empty when the cell itself is empty.
pub fn run_through(board: &Board, index: usize, axis: Axis) -> Vec<usize> {
    let Some(color) = board.color_at(index) else {
        return Vec::new();
    };
    let same = |idx: &usize| board.color_at(*idx) == Some(color);

    let mut backward: Vec<usize> = (1..)
        .map_while(|k| step(index, axis, -k))
        .take_while(same)
        .collect();
    backward.reverse();

    let forward = (1..).map_while(|k| step(index, axis, k)).take_while(same);

    let mut run = backward;
    run.push(index);
    run.extend(forward);
    run
}

/// De-duplicated union of all runs of length `>= MIN_LINE`.
pub fn find_clearable_set(board: &Board) -> BTreeSet<usize> {
    let mut clear = BTreeSet::new();
    for index in 0..TOTAL_CELLS {
        if board.is_empty_at(index) {
            continue;
        }
        for axis in Axis::ALL {
            let run = run_through(board, index, axis);
            if run.len() >= MIN_LINE {
                clear.extend(run);
            }
        }
    }
    clear
}

/// Detect on the unmodified board, then empty every member of the clear-set
/// in one pass.
pub fn clear_lines(board: &Board) -> ClearOutcome {
    let clear = find_clearable_set(board);
    let mut cleared_board = board.clone();
    for &idx in &clear {
        cleared_board.set(idx, crate::cells::Cell::Empty);
    }
    ClearOutcome {
        board: cleared_board,
        cleared: clear.into_iter().collect(),
    }
}
