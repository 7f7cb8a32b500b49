use crate::engine::Board;
use crate::heuristics::manhattan_distance;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Closed-set size past which a search is abandoned.
///
/// Only 181,440 boards are reachable from any start, so an unsolvable input
/// hits this cap long before the open set drains. A solvable input that hits
/// it returns an empty path even though a solution exists.
pub const MAX_CLOSED_STATES: usize = 100_000;

/// Result of an A* run.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Boards from the start to `GOAL_STATE`, both inclusive. Empty when no
    /// solution was found.
    pub path: Vec<Board>,
    /// Number of distinct boards closed during the search.
    pub expanded: usize,
    /// Whether the search stopped because it exceeded its closed-set budget.
    pub capped: bool,
}

impl SearchOutcome {
    /// Whether a path to the goal was found.
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of slides along the path, or `None` when unsolved.
    pub fn move_count(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

#[derive(Debug)]
struct SearchNode {
    board: Board,
    moves: u32,
    heuristic: u32,
    path: Vec<Board>,
}

impl SearchNode {
    fn cost(&self) -> u32 {
        self.moves + self.heuristic
    }
}

// `BinaryHeap` is a max-heap: lower cost ranks higher, and among equal costs
// the deeper node wins.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost()
            .cmp(&self.cost())
            .then_with(|| self.moves.cmp(&other.moves))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Finds a shortest sequence of boards from `start` to `GOAL_STATE`.
///
/// Returns an empty `Vec` if the board is unsolvable or the search exceeded
/// [`MAX_CLOSED_STATES`]. Callers that need to tell those apart should check
/// [`Board::is_solvable`] first, or use [`search_astar`].
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, GOAL_STATE};
/// use eight_puzzle_solver::solver::solve_astar;
///
/// let board = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let path = solve_astar(&board);
/// assert_eq!(path, vec![board, GOAL_STATE]);
/// ```
pub fn solve_astar(start: &Board) -> Vec<Board> {
    search_astar(start, MAX_CLOSED_STATES).path
}

/// A* over board states with Manhattan distance as the heuristic and a
/// closed set keyed by [`Board::key`].
pub fn search_astar(start: &Board, max_closed: usize) -> SearchOutcome {
    let mut open = BinaryHeap::new();
    let mut closed: HashSet<u32> = HashSet::new();

    open.push(SearchNode {
        board: *start,
        moves: 0,
        heuristic: manhattan_distance(start),
        path: vec![*start],
    });

    while let Some(node) = open.pop() {
        if node.board.is_goal() {
            info!(
                "A* found a {}-move solution after closing {} boards",
                node.moves,
                closed.len()
            );
            return SearchOutcome {
                path: node.path,
                expanded: closed.len(),
                capped: false,
            };
        }

        // Stale entry: a cheaper copy of this board was already expanded.
        if !closed.insert(node.board.key()) {
            continue;
        }

        if closed.len() > max_closed {
            warn!(
                "A* abandoned after closing {} boards (limit {})",
                closed.len(),
                max_closed
            );
            return SearchOutcome {
                path: Vec::new(),
                expanded: closed.len(),
                capped: true,
            };
        }

        for (next, _) in node.board.valid_moves() {
            if closed.contains(&next.key()) {
                continue;
            }
            let mut path = Vec::with_capacity(node.path.len() + 1);
            path.extend_from_slice(&node.path);
            path.push(next);
            open.push(SearchNode {
                board: next,
                moves: node.moves + 1,
                heuristic: manhattan_distance(&next),
                path,
            });
        }
    }

    debug!("A* open set exhausted after closing {} boards", closed.len());
    SearchOutcome {
        path: Vec::new(),
        expanded: closed.len(),
        capped: false,
    }
}
