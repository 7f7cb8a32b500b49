//! # Eight Puzzle Solver Library
//!
//! This library solves the 3x3 sliding tile puzzle with two independent
//! solvers and lets callers compare their answers:
//! - an exact A* search that returns a shortest path to the goal, and
//! - a genetic algorithm that evolves fixed-length move sequences and may
//!   return a longer path, or none that reaches the goal.
//!
//! It is used by two binaries:
//! - `solve`: Takes a board and genetic parameters, runs both solvers and
//!   prints their paths side by side.
//! - `solver_benchmark`: Runs both solvers over a batch of seeded random
//!   boards and reports success rates and average path lengths.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), slide directions (`Move`),
//!   the goal state, the solvability check and the move generator.
//! - `heuristics`: Manhattan distance and misplaced-tile count.
//! - `solver`: The A* search (`solve_astar`, `search_astar`).
//! - `genetic`: The genetic solver and its operators.
//! - `error`: `BoardError`, returned when input is not a permutation of `0..=8`.
//! - `utils`: Parsing boards from text and recovering moves from a path.
//!
//! Both solvers are synchronous and single-threaded. Neither keeps state
//! between calls.

pub mod engine;
pub mod error;
pub mod genetic;
pub mod heuristics;
pub mod solver;
pub mod utils;
