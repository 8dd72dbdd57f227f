//! Weighted A* over the 4-connected board.
//!
//! Uniform step cost, Manhattan heuristic, `f = g + w * h`. Ground movers
//! cannot pass through cells holding a ground unit, except the destination
//! itself. Airborne movers ignore ground occupancy. When the expansion
//! budget runs out the search returns the route to the node closest to the
//! goal seen so far.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use relic_core::constants::DEFAULT_HEURISTIC_WEIGHT;
use relic_core::enums::Locomotion;
use relic_core::types::Position;

use crate::board::Board;

/// Stateless path service with a fixed budget and heuristic weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pathfinder {
    pub max_expanded_nodes: usize,
    pub heuristic_weight: f64,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self {
            max_expanded_nodes: usize::MAX,
            heuristic_weight: DEFAULT_HEURISTIC_WEIGHT,
        }
    }
}

impl Pathfinder {
    pub fn new(max_expanded_nodes: usize, heuristic_weight: f64) -> Self {
        Self {
            max_expanded_nodes,
            heuristic_weight,
        }
    }

    pub fn find_path(
        &self,
        board: &Board,
        from: Position,
        to: Position,
        locomotion: Locomotion,
    ) -> Option<Vec<Position>> {
        find_path(
            board,
            from,
            to,
            locomotion,
            self.max_expanded_nodes,
            self.heuristic_weight,
        )
    }
}

/// Open-set entry. Lowest `f` first, then lowest `h`, then discovery order.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f64,
    h: u32,
    seq: u64,
    index: usize,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Route from `from` to `to` inclusive.
///
/// Returns `[from]` when both are equal, a partial route when more than
/// `max_expanded_nodes` nodes get expanded, and `None` when `to` cannot be
/// reached or either end lies off the board.
pub fn find_path(
    board: &Board,
    from: Position,
    to: Position,
    locomotion: Locomotion,
    max_expanded_nodes: usize,
    heuristic_weight: f64,
) -> Option<Vec<Position>> {
    if from == to {
        return Some(vec![from]);
    }
    let start = board.index_of(from)?;
    let goal = board.index_of(to)?;

    let cells = board.cell_count();
    let mut g = vec![f64::INFINITY; cells];
    let mut parent: Vec<Option<usize>> = vec![None; cells];
    let mut closed = vec![false; cells];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;

    let start_h = from.manhattan_distance_to(&to);
    g[start] = 0.0;
    open.push(OpenNode {
        f: heuristic_weight * f64::from(start_h),
        h: start_h,
        seq,
        index: start,
    });

    let mut best = (start, start_h);
    let mut expanded = 0usize;

    while let Some(node) = open.pop() {
        if closed[node.index] {
            continue;
        }
        if node.index == goal {
            return Some(reconstruct(board, &parent, goal));
        }
        closed[node.index] = true;
        if node.h < best.1 {
            best = (node.index, node.h);
        }

        expanded += 1;
        if expanded > max_expanded_nodes {
            return Some(reconstruct(board, &parent, best.0));
        }

        let current = board.position_of(node.index);
        for neighbor in board.neighbors(current) {
            let Some(next) = board.index_of(neighbor) else {
                continue;
            };
            if closed[next] {
                continue;
            }
            if locomotion == Locomotion::Ground
                && neighbor != to
                && board.has_ground_occupant(neighbor)
            {
                continue;
            }

            let tentative = g[node.index] + 1.0;
            if tentative < g[next] {
                g[next] = tentative;
                parent[next] = Some(node.index);
                let h = neighbor.manhattan_distance_to(&to);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + heuristic_weight * f64::from(h),
                    h,
                    seq,
                    index: next,
                });
            }
        }
    }

    None
}

fn reconstruct(board: &Board, parent: &[Option<usize>], end: usize) -> Vec<Position> {
    let mut path = vec![board.position_of(end)];
    let mut current = end;
    while let Some(prev) = parent[current] {
        path.push(board.position_of(prev));
        current = prev;
    }
    path.reverse();
    path
}

/// Whether consecutive positions are orthogonal single steps on the board.
pub fn is_contiguous(board: &Board, path: &[Position]) -> bool {
    path.iter().all(|p| board.is_in_bounds(*p))
        && path.windows(2).all(|pair| pair[0].is_adjacent_to(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::test_support::{airborne_defense, ground_defense};

    fn empty() -> Board {
        Board::default()
    }

    #[test]
    fn test_same_cell_is_single_step_path() {
        let board = empty();
        let p = Position::new(4, 4);
        assert_eq!(
            find_path(&board, p, p, Locomotion::Ground, usize::MAX, 1.0),
            Some(vec![p])
        );
    }

    #[test]
    fn test_straight_line_on_empty_board() {
        let board = empty();
        let path = find_path(
            &board,
            Position::new(0, 0),
            Position::new(0, 5),
            Locomotion::Ground,
            usize::MAX,
            1.0,
        )
        .unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(0, 5)));
        assert!(path.iter().all(|p| p.x == 0), "path left the axis: {path:?}");
        assert!(is_contiguous(&board, &path));
    }

    #[test]
    fn test_optimal_length_on_empty_board() {
        let board = empty();
        for (from, to) in [
            (Position::new(0, 0), Position::new(24, 24)),
            (Position::new(3, 17), Position::new(20, 2)),
            (Position::new(12, 0), Position::new(12, 12)),
        ] {
            let path = find_path(&board, from, to, Locomotion::Ground, usize::MAX, 1.0).unwrap();
            assert_eq!(path.len() as u32 - 1, from.manhattan_distance_to(&to));
            assert!(is_contiguous(&board, &path));
        }
    }

    #[test]
    fn test_ground_detours_around_wall() {
        let mut board = empty();
        // Column x = 5 blocked except y = 24.
        for (i, y) in (0..24).enumerate() {
            board
                .place(ground_defense(100 + i as u64), Position::new(5, y))
                .unwrap();
        }
        let from = Position::new(0, 0);
        let to = Position::new(10, 0);
        let path = find_path(&board, from, to, Locomotion::Ground, usize::MAX, 1.0).unwrap();
        assert_eq!(path.last(), Some(&to));
        assert!(is_contiguous(&board, &path));
        assert!(path.contains(&Position::new(5, 24)));
        assert!(path.iter().all(|p| !board.has_ground_occupant(*p)));
        assert!(path.len() as u32 - 1 > from.manhattan_distance_to(&to));
    }

    #[test]
    fn test_airborne_ignores_ground_units() {
        let mut board = empty();
        for (i, y) in (0..25).enumerate() {
            board
                .place(ground_defense(100 + i as u64), Position::new(5, y))
                .unwrap();
        }
        let from = Position::new(0, 3);
        let to = Position::new(10, 3);
        assert!(find_path(&board, from, to, Locomotion::Ground, usize::MAX, 1.0).is_none());
        let path = find_path(&board, from, to, Locomotion::Airborne, usize::MAX, 1.0).unwrap();
        assert_eq!(path.len(), 11);
    }

    #[test]
    fn test_airborne_units_do_not_block_search() {
        let mut board = empty();
        board.place(airborne_defense(1), Position::new(0, 1)).unwrap();
        let path = find_path(
            &board,
            Position::new(0, 0),
            Position::new(0, 2),
            Locomotion::Airborne,
            usize::MAX,
            1.0,
        )
        .unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_occupied_destination_is_explorable() {
        let mut board = empty();
        let target = Position::new(6, 6);
        board.place(ground_defense(1), target).unwrap();
        let path = find_path(
            &board,
            Position::new(6, 0),
            target,
            Locomotion::Ground,
            usize::MAX,
            1.0,
        )
        .unwrap();
        assert_eq!(path.last(), Some(&target));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn test_enclosed_target_unreachable() {
        let mut board = empty();
        // The corner's only neighbors hold ground units.
        board.place(ground_defense(1), Position::new(1, 0)).unwrap();
        board.place(ground_defense(2), Position::new(0, 1)).unwrap();
        let to = Position::new(0, 0);
        let from = Position::new(10, 10);
        assert!(find_path(&board, from, to, Locomotion::Ground, usize::MAX, 1.0).is_none());
    }

    #[test]
    fn test_off_board_endpoints() {
        let board = empty();
        assert!(find_path(
            &board,
            Position::new(0, 0),
            Position::new(30, 0),
            Locomotion::Ground,
            usize::MAX,
            1.0
        )
        .is_none());
    }

    #[test]
    fn test_budget_exhaustion_returns_partial_path() {
        let board = empty();
        let from = Position::new(0, 0);
        let to = Position::new(24, 24);
        let path = find_path(&board, from, to, Locomotion::Ground, 5, 1.0).unwrap();
        assert_eq!(path[0], from);
        assert_ne!(path.last(), Some(&to));
        assert!(path.len() > 1);
        assert!(is_contiguous(&board, &path));
        let end = *path.last().unwrap();
        assert!(end.manhattan_distance_to(&to) < from.manhattan_distance_to(&to));
    }

    #[test]
    fn test_zero_budget_returns_start() {
        let board = empty();
        let from = Position::new(3, 3);
        let path = find_path(&board, from, Position::new(9, 9), Locomotion::Ground, 0, 1.0).unwrap();
        assert_eq!(path, vec![from]);
    }

    #[test]
    fn test_weighted_heuristic_still_valid() {
        let mut board = empty();
        for (i, y) in (3..20).enumerate() {
            board
                .place(ground_defense(100 + i as u64), Position::new(8, y))
                .unwrap();
        }
        let from = Position::new(2, 10);
        let to = Position::new(15, 10);
        let path = find_path(&board, from, to, Locomotion::Ground, usize::MAX, 2.5).unwrap();
        assert_eq!(path[0], from);
        assert_eq!(path.last(), Some(&to));
        assert!(is_contiguous(&board, &path));
        assert!(path.iter().all(|p| *p == to || !board.has_ground_occupant(*p)));
    }

    #[test]
    fn test_pathfinder_defaults() {
        let finder = Pathfinder::default();
        assert_eq!(finder.max_expanded_nodes, usize::MAX);
        assert!((finder.heuristic_weight - 1.0).abs() < 1e-9);
        let board = empty();
        let path = finder
            .find_path(&board, Position::new(1, 1), Position::new(1, 4), Locomotion::Ground)
            .unwrap();
        assert_eq!(path.len(), 4);
    }
}
