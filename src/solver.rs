//! This module contains the exhaustive solving logic of the engine: counting
//! all solutions of a board, finding the first solution, the unique-candidate
//! scan used by autofill, and hints.
//!
//! Every search here operates on an owned scratch copy of the grid, never on
//! the live board, so an unsolvable or abandoned search can never corrupt
//! session state. "No solution" is a normal outcome that callers render as
//! "unsolvable", not an error condition of the engine.
//!
//! The searches assume that the filled cells of the input contain no
//! duplicates; callers gate on [Board::has_errors] before solving, as the
//! surrounding command layer does for validation and hints.

use crate::{Board, SudokuGrid};
use crate::checker;
use crate::error::{BoardError, BoardResult};

/// The result of scanning one empty cell for values that survive row, column
/// and block exclusion. All three cases must be distinguished: autofill only
/// acts on [Candidate::Unique], while [Candidate::None] means the board is
/// locally unsolvable at that cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Candidate {

    /// No value can legally be placed in the cell.
    None,

    /// Exactly one value can legally be placed in the cell, which is wrapped
    /// in this instance.
    Unique(usize),

    /// More than one value can legally be placed in the cell. This is also
    /// returned for cells that are already filled, since there is nothing to
    /// fill there.
    Multiple
}

/// Scans all values for the cell at the given coordinates and classifies the
/// surviving candidates. A value survives if it appears nowhere in the
/// cell's row, column or block.
pub fn unique_candidate(grid: &SudokuGrid, row: usize, column: usize)
        -> Candidate {
    if grid.cell(row, column) != 0 {
        return Candidate::Multiple;
    }

    let mut found = Candidate::None;

    for value in 1..=grid.size() {
        if !checker::appears_at_least_once(grid, row, column, value) {
            match found {
                Candidate::None => found = Candidate::Unique(value),
                _ => return Candidate::Multiple
            }
        }
    }

    found
}

fn count_rec(grid: &mut SudokuGrid, row: usize, column: usize) -> usize {
    let size = grid.size();

    if row == size {
        return 1;
    }

    let next_column = (column + 1) % size;
    let next_row = if next_column == 0 { row + 1 } else { row };

    if grid.cell(row, column) != 0 {
        return count_rec(grid, next_row, next_column);
    }

    let mut count = 0;

    for value in 1..=size {
        if !checker::appears_at_least_once(grid, row, column, value) {
            grid.set(row, column, value).unwrap();
            count += count_rec(grid, next_row, next_column);
            grid.set(row, column, 0).unwrap();
        }
    }

    count
}

/// Counts all solutions of the given grid by exhaustive backtracking over
/// its empty cells in row-major order. Unlike [solve], this explores every
/// branch and never stops at the first completion, which makes it suitable
/// for checking solvability and uniqueness.
///
/// No upper bound is imposed; on large or deeply ambiguous grids this is
/// exponential by design.
pub fn count_solutions(grid: &SudokuGrid) -> usize {
    let mut scratch = grid.clone();
    count_rec(&mut scratch, 0, 0)
}

fn solve_rec(grid: &mut SudokuGrid, row: usize, column: usize) -> bool {
    let size = grid.size();

    if row == size {
        return true;
    }

    let next_column = (column + 1) % size;
    let next_row = if next_column == 0 { row + 1 } else { row };

    if grid.cell(row, column) != 0 {
        return solve_rec(grid, next_row, next_column);
    }

    for value in 1..=size {
        if !checker::appears_at_least_once(grid, row, column, value) {
            grid.set(row, column, value).unwrap();

            if solve_rec(grid, next_row, next_column) {
                return true;
            }

            grid.set(row, column, 0).unwrap();
        }
    }

    false
}

/// Solves the given grid by backtracking, returning the first full solution
/// found, or `None` if there is none. The branching is the same as in
/// [count_solutions], but the search short-circuits on the first success.
/// Candidate values are tried in ascending order, so the result is
/// deterministic for a given input.
pub fn solve(grid: &SudokuGrid) -> Option<SudokuGrid> {
    let mut scratch = grid.clone();

    if solve_rec(&mut scratch, 0, 0) {
        Some(scratch)
    }
    else {
        None
    }
}

/// Computes the value the cell at the given coordinates holds in a solution
/// of the board, without mutating the board. The solution is obtained by the
/// deterministic [solve], so repeated calls agree even on ambiguous boards.
///
/// # Errors
///
/// * `BoardError::OutOfBounds` if `row` or `column` is not less than
/// [Board::size].
/// * `BoardError::FixedCell` if the target cell is fixed; its value is part
/// of the puzzle and not subject to hints.
/// * `BoardError::Unsolvable` if the board has no solution.
pub fn hint(board: &Board, row: usize, column: usize) -> BoardResult<usize> {
    if board.is_fixed(row, column)? {
        return Err(BoardError::FixedCell);
    }

    match solve(board.grid()) {
        Some(solution) => Ok(solution.cell(row, column)),
        None => Err(BoardError::Unsolvable)
    }
}
