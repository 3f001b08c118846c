use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cells::Color;
use crate::game::SpawnQueue;
use crate::grid::{step, Axis, Board, POTENTIAL_WINDOW, SPAWN_COUNT, TOTAL_CELLS};

/// Random ball placement over a pluggable random source.
///
/// Positions are drawn by shuffling the empty-cell list and taking a
/// prefix, so every placement lands on distinct empty cells.
#[derive(Debug)]
pub struct Spawner<R = ChaCha20Rng> {
    rng: R,
}

impl Spawner<ChaCha20Rng> {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Spawner<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn random_color(&mut self) -> Color {
        Color::ALL[self.rng.random_range(0..Color::ALL.len())]
    }

    pub fn random_colors(&mut self, count: usize) -> Vec<Color> {
        (0..count).map(|_| self.random_color()).collect()
    }

    /// Fresh preview of the next [`SPAWN_COUNT`] balls.
    pub fn next_queue(&mut self) -> SpawnQueue {
        let mut colors = [Color::Red; SPAWN_COUNT];
        for slot in colors.iter_mut() {
            *slot = self.random_color();
        }
        SpawnQueue::new(colors)
    }

    /// Fill up to `count` distinct empty cells with independent random
    /// colors. Places fewer when the board runs out of space.
    pub fn place_random(&mut self, board: &mut Board, count: usize) -> Vec<(usize, Color)> {
        let positions = self.pick_empty_cells(board, count);
        let colors = self.random_colors(positions.len());
        place_all(board, &positions, &colors)
    }

    /// Place exactly `colors` onto distinct random empty cells.
    ///
    /// Returns `None` without touching the board when fewer empty cells
    /// remain than colors to place.
    pub fn place_queued(
        &mut self,
        board: &mut Board,
        colors: &[Color],
    ) -> Option<Vec<(usize, Color)>> {
        if board.empty_count() < colors.len() {
            return None;
        }
        let positions = self.pick_empty_cells(board, colors.len());
        Some(place_all(board, &positions, colors))
    }

    fn pick_empty_cells(&mut self, board: &Board, count: usize) -> Vec<usize> {
        let mut empty = board.empty_cells();
        empty.shuffle(&mut self.rng);
        empty.truncate(count);
        empty
    }
}

fn place_all(board: &mut Board, positions: &[usize], colors: &[Color]) -> Vec<(usize, Color)> {
    positions
        .iter()
        .zip(colors)
        .map(|(&idx, &color)| {
            board.place(idx, color);
            (idx, color)
        })
        .collect()
}

/// Count windows of [`POTENTIAL_WINDOW`] same-colored balls.
///
/// Each filled cell starts one forward window per axis; a window counts when
/// it fits on the board and every cell in it matches the starting color.
/// Overlapping windows are counted separately, so a run of five contributes
/// two. This is a hint heuristic, not a guarantee the line can be completed.
pub fn count_potential_lines(board: &Board) -> u32 {
    let mut count = 0;
    for index in 0..TOTAL_CELLS {
        let Some(color) = board.color_at(index) else {
            continue;
        };
        for axis in Axis::ALL {
            let full_window = (1..POTENTIAL_WINDOW as isize).all(|k| {
                step(index, axis, k).is_some_and(|idx| board.color_at(idx) == Some(color))
            });
            if full_window {
                count += 1;
            }
        }
    }
    count
}
