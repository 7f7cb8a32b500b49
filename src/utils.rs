use crate::engine::{Board, Move};
use crate::error::BoardError;

/// Parses a board from text.
///
/// Every digit `0`-`8` is read as one cell in row-major order. `_` and `.`
/// also denote the blank. Whitespace, commas and square brackets are
/// separators and are skipped, so all of these describe the same board:
///
/// - `"123456780"`
/// - `"1,2,3,4,5,6,7,8,0"`
/// - `"[1, 2, 3, 4, 5, 6, 7, 8, 0]"`
/// - a three-line grid such as `"1 2 3\n4 5 6\n7 8 _"`
///
/// # Returns
/// * `Ok(Board)` if the text holds exactly nine cells forming a permutation of `0..=8`.
/// * `Err(BoardError::InvalidToken)` for any other character.
/// * `Err(BoardError::WrongLength)` if there are not exactly nine cells.
/// * The permutation errors of [`Board::new`] otherwise.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::GOAL_STATE;
/// use eight_puzzle_solver::utils::board_from_str;
///
/// assert_eq!(board_from_str("1 2 3\n4 5 6\n7 8 _").unwrap(), GOAL_STATE);
/// assert!(board_from_str("1 2 3 x").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, BoardError> {
    let mut cells = Vec::with_capacity(9);
    for ch in s.chars() {
        match ch {
            '0'..='9' => cells.push(ch as u8 - b'0'),
            '_' | '.' => cells.push(0),
            ',' | '[' | ']' => {}
            c if c.is_whitespace() => {}
            other => {
                return Err(BoardError::InvalidToken {
                    token: other.to_string(),
                })
            }
        }
    }
    Board::from_slice(&cells)
}

/// Recovers the direction of every slide along a path of boards.
///
/// Returns `None` if any consecutive pair is not exactly one legal slide apart.
pub fn moves_between(path: &[Board]) -> Option<Vec<Move>> {
    path.windows(2)
        .map(|pair| {
            pair[0]
                .valid_moves()
                .into_iter()
                .find(|(next, _)| *next == pair[1])
                .map(|(_, mv)| mv)
        })
        .collect()
}

/// Renders a move list as `"Up, Left, ..."`, or `"(none)"` when empty.
pub fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "(none)".to_string();
    }
    moves
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
