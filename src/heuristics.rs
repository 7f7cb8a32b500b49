use crate::engine::{Board, BOARD_SIZE, GOAL_STATE};

/// Sum over every tile (blank excluded) of its row plus column distance from
/// the cell it occupies in `GOAL_STATE`.
///
/// This never overestimates the number of slides still needed and changes by
/// exactly one per slide, which makes it admissible and consistent for A*.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, GOAL_STATE};
/// use eight_puzzle_solver::heuristics::manhattan_distance;
///
/// assert_eq!(manhattan_distance(&GOAL_STATE), 0);
/// let one_away = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// assert_eq!(manhattan_distance(&one_away), 1);
/// ```
pub fn manhattan_distance(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(index, &value)| {
            let target = value as usize - 1;
            let dr = (index / BOARD_SIZE).abs_diff(target / BOARD_SIZE);
            let dc = (index % BOARD_SIZE).abs_diff(target % BOARD_SIZE);
            (dr + dc) as u32
        })
        .sum()
}

/// Counts tiles (blank excluded) that are not where `GOAL_STATE` has them.
pub fn tiles_out_of_place(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .zip(GOAL_STATE.cells().iter())
        .filter(|&(&value, &goal)| value != 0 && value != goal)
        .count() as u32
}
