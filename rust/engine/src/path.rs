//! Breadth-first path search over empty cells.
//!
//! A ball travels orthogonally through empty cells only. The destination is
//! always enterable so the search can terminate on it. Because the search is
//! breadth-first, the returned path is the shortest in edge count; only its
//! existence matters for move legality, the exact route is for animation.

use std::collections::VecDeque;

use crate::grid::{neighbors, Board, TOTAL_CELLS};

type Parents = [Option<usize>; TOTAL_CELLS];

/// Find the shortest open path from `from` to `to`, both ends included.
///
/// Returns `Some(vec![from])` when `from == to` and `None` when the
/// destination is unreachable.
///
/// ```
/// use line98_engine::cells::Color;
/// use line98_engine::grid::Board;
/// use line98_engine::path::find_path;
///
/// let mut board = Board::empty();
/// board.place(0, Color::Red);
/// assert_eq!(find_path(&board, 0, 2), Some(vec![0, 1, 2]));
/// ```
pub fn find_path(board: &Board, from: usize, to: usize) -> Option<Vec<usize>> {
    if from == to {
        return Some(vec![from]);
    }
    let parents = search(board, from, to)?;

    let mut path = vec![to];
    let mut current = to;
    while let Some(prev) = parents[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}

/// Existence-only variant of [`find_path`].
pub fn is_reachable(board: &Board, from: usize, to: usize) -> bool {
    from == to || search(board, from, to).is_some()
}

/// Every empty cell a ball at `from` can move to, in ascending index order.
///
/// One flood fill; agrees with [`is_reachable`] for each empty destination.
pub fn reachable_cells(board: &Board, from: usize) -> Vec<usize> {
    let mut visited = [false; TOTAL_CELLS];
    let mut queue = VecDeque::with_capacity(TOTAL_CELLS);
    visited[from] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if !visited[next] && board.is_empty_at(next) {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    (0..TOTAL_CELLS)
        .filter(|&i| i != from && visited[i])
        .collect()
}

fn search(board: &Board, from: usize, to: usize) -> Option<Box<Parents>> {
    let mut parents: Box<Parents> = Box::new([None; TOTAL_CELLS]);
    let mut visited = [false; TOTAL_CELLS];
    let mut queue = VecDeque::with_capacity(TOTAL_CELLS);

    visited[from] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if visited[next] || !(next == to || board.is_empty_at(next)) {
                continue;
            }
            visited[next] = true;
            parents[next] = Some(current);
            if next == to {
                return Some(parents);
            }
            queue.push_back(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::Color;
    use crate::grid::to_index;

    #[test]
    fn self_path_is_single_cell() {
        let board = Board::empty();
        assert_eq!(find_path(&board, 7, 7), Some(vec![7]));
    }

    #[test]
    fn straight_line_on_empty_board() {
        let mut board = Board::empty();
        board.place(0, Color::Red);
        let path = find_path(&board, 0, 4).expect("path");
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn path_is_shortest_around_wall() {
        // Wall across column 1 except the bottom row.
        let mut board = Board::empty();
        board.place(0, Color::Red);
        for row in 0..8 {
            board.place(to_index(row, 1), Color::Blue);
        }
        let path = find_path(&board, 0, 2).expect("path exists via bottom row");
        // Down 8, right 2, up 8.
        assert_eq!(path.len(), 19);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&2));
    }

    #[test]
    fn enclosed_ball_has_no_path() {
        let mut board = Board::empty();
        let center = to_index(4, 4);
        board.place(center, Color::Green);
        for n in neighbors(center) {
            board.place(n, Color::Yellow);
        }
        assert_eq!(find_path(&board, center, 0), None);
        assert!(!is_reachable(&board, center, 0));
    }

    #[test]
    fn reachable_cells_match_pairwise_search() {
        // Column 3 walled off except row 8; right side split by a row-4 wall.
        let mut board = Board::empty();
        board.place(0, Color::Red);
        for row in 0..8 {
            board.place(to_index(row, 3), Color::Blue);
        }
        for col in 4..9 {
            board.place(to_index(4, col), Color::Green);
        }
        let from = to_index(2, 6);
        board.place(from, Color::Red);

        for start in [0, from] {
            let expected: Vec<usize> = (0..TOTAL_CELLS)
                .filter(|&to| board.is_empty_at(to) && is_reachable(&board, start, to))
                .collect();
            assert_eq!(reachable_cells(&board, start), expected);
        }
        assert!(!reachable_cells(&board, from).contains(&to_index(8, 0)));
        assert!(reachable_cells(&board, 0).contains(&to_index(8, 8)));
    }

    #[test]
    fn path_never_crosses_occupied_cells() {
        let mut board = Board::empty();
        board.place(0, Color::Red);
        board.place(2, Color::Cyan);
        board.place(to_index(1, 2), Color::Cyan);
        let path = find_path(&board, 0, 3).expect("path");
        for &idx in &path[1..path.len() - 1] {
            assert!(board.is_empty_at(idx), "cell {} on path is occupied", idx);
        }
    }
}
