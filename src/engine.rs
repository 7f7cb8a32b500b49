//! Board model and move generator for the 3x3 sliding puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: the four directions a neighbor tile can slide into the blank from.
//! - `Board`: an immutable permutation of `0..=8` laid out row-major, where `0`
//!   marks the blank. Every transformation returns a new `Board`.
//! - `GOAL_STATE`: the solved configuration `[1, 2, 3, 4, 5, 6, 7, 8, 0]`.
use crate::error::BoardError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, blank included.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The solved board. Tiles ascend row-major with the blank in the bottom-right corner.
pub const GOAL_STATE: Board = Board {
    cells: [1, 2, 3, 4, 5, 6, 7, 8, 0],
};

/// A single slide, named after the neighbor of the blank that moves into it.
///
/// `Move::Up` swaps the blank with the cell directly above it, so the blank
/// itself travels one row up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions in generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column offset from the blank to the neighbor being swapped in.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The slide that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Draws a direction uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Move::ALL[rng.gen_range(0..Move::ALL.len())]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// The 3x3 board as a flat, row-major array of tile values.
///
/// A `Board` always holds each of `0..=8` exactly once. The only way to build
/// one from outside this module is through a validating constructor, so
/// solver code never has to re-check the permutation invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELL_COUNT],
}

impl Board {
    /// Builds a board from nine cells, rejecting anything that is not a
    /// permutation of `0..=8`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, GOAL_STATE};
    /// use eight_puzzle_solver::error::BoardError;
    ///
    /// let board = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// assert_eq!(board, GOAL_STATE);
    ///
    /// assert_eq!(
    ///     Board::new([1, 1, 3, 4, 5, 6, 7, 8, 0]),
    ///     Err(BoardError::DuplicateValue { value: 1 })
    /// );
    /// ```
    pub fn new(cells: [u8; CELL_COUNT]) -> Result<Self, BoardError> {
        let mut seen = [false; CELL_COUNT];
        for (index, &value) in cells.iter().enumerate() {
            if value as usize >= CELL_COUNT {
                return Err(BoardError::ValueOutOfRange { index, value });
            }
            if seen[value as usize] {
                return Err(BoardError::DuplicateValue { value });
            }
            seen[value as usize] = true;
        }
        Ok(Board { cells })
    }

    /// Like [`Board::new`], but also accepts slices of the wrong length and
    /// reports them as [`BoardError::WrongLength`].
    pub fn from_slice(cells: &[u8]) -> Result<Self, BoardError> {
        let array: [u8; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| BoardError::WrongLength { found: cells.len() })?;
        Self::new(array)
    }

    /// Shuffles `0..=8` until the permutation is solvable.
    pub fn random_solvable(rng: &mut impl Rng) -> Self {
        let mut cells = GOAL_STATE.cells;
        loop {
            cells.shuffle(rng);
            let board = Board { cells };
            if board.is_solvable() {
                return board;
            }
        }
    }

    /// Reproducible variant of [`Board::random_solvable`].
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::random_solvable(&mut rng)
    }

    /// Walks `moves` random legal slides away from the goal, never undoing
    /// the previous slide. The result is always solvable in at most `moves` moves.
    pub fn scrambled(rng: &mut impl Rng, moves: usize) -> Self {
        let mut board = GOAL_STATE;
        let mut last: Option<Move> = None;
        for _ in 0..moves {
            let candidates: Vec<(Board, Move)> = board
                .valid_moves()
                .into_iter()
                .filter(|&(_, mv)| last.map_or(true, |prev| mv != prev.opposite()))
                .collect();
            let &(next, mv) = &candidates[rng.gen_range(0..candidates.len())];
            board = next;
            last = Some(mv);
        }
        board
    }

    /// Row-major cell values, `0` for the blank.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside `0..BOARD_SIZE`.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.cells[r * BOARD_SIZE + c]
    }

    /// Index of the blank in the flat cell array.
    pub fn blank_index(&self) -> usize {
        self.cells
            .iter()
            .position(|&v| v == 0)
            .expect("a validated board always contains exactly one blank")
    }

    /// True when every cell matches `GOAL_STATE`.
    pub fn is_goal(&self) -> bool {
        *self == GOAL_STATE
    }

    /// Number of tile pairs (blank ignored) that appear in reverse order
    /// relative to the goal ordering.
    pub fn count_inversions(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }

    /// On an odd-width board the blank's row does not affect parity, so a
    /// board is solvable exactly when its inversion count is even.
    pub fn is_solvable(&self) -> bool {
        self.count_inversions() % 2 == 0
    }

    /// Packs the board into a base-9 integer. Distinct boards always map to
    /// distinct keys (9^9 fits in 32 bits).
    pub fn key(&self) -> u32 {
        self.cells
            .iter()
            .fold(0u32, |acc, &v| acc * CELL_COUNT as u32 + v as u32)
    }

    /// Applies a single slide, returning `None` if the neighbor it names lies
    /// outside the grid.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let blank = self.blank_index();
        let (dr, dc) = mv.as_offset();
        let nr = (blank / BOARD_SIZE) as isize + dr;
        let nc = (blank % BOARD_SIZE) as isize + dc;

        if nr < 0 || nr >= BOARD_SIZE as isize || nc < 0 || nc >= BOARD_SIZE as isize {
            return None;
        }

        let neighbor = nr as usize * BOARD_SIZE + nc as usize;
        let mut cells = self.cells;
        cells.swap(blank, neighbor);
        Some(Board { cells })
    }

    /// Every legal slide from this board, in `Move::ALL` order.
    ///
    /// A corner blank yields 2 moves, an edge blank 3, the center 4.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Move, GOAL_STATE};
    ///
    /// let moves: Vec<Move> = GOAL_STATE.valid_moves().iter().map(|&(_, mv)| mv).collect();
    /// assert_eq!(moves, vec![Move::Up, Move::Left]);
    /// ```
    pub fn valid_moves(&self) -> Vec<(Board, Move)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move(mv).map(|board| (board, mv)))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                match self.get_tile(r, c) {
                    0 => write!(f, " _")?,
                    tile => write!(f, "{:2}", tile)?,
                }
            }
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
