//! This module contains the constraint checker: occurrence counting of a
//! value within a row, column or block, duplicate detection, and maintenance
//! of the "erroneous" overlay of a board.
//!
//! Erroneous marking here is *duplicate detection*, not rule violation in a
//! wider sense: a cell is erroneous if and only if some other cell in its
//! row, column or block holds the same nonzero value. Marking is therefore
//! symmetric; if two cells conflict, both are marked.
//!
//! All functions are read-only over the grid. The `refresh_*` family writes
//! the overlay, which is a plain `bool` buffer parallel to the cell buffer
//! and owned by the caller (in practice, by [Board](../struct.Board.html)).

use crate::SudokuGrid;
use crate::geometry;

/// Counts the occurrences of `value` in the given row. A `value` of 0
/// (empty) is defined to occur zero times, since empty cells never conflict.
pub fn count_in_row(grid: &SudokuGrid, row: usize, value: usize) -> usize {
    if value == 0 {
        return 0;
    }

    (0..grid.size())
        .filter(|&column| grid.cell(row, column) == value)
        .count()
}

/// Counts the occurrences of `value` in the given column. A `value` of 0
/// (empty) is defined to occur zero times.
pub fn count_in_col(grid: &SudokuGrid, column: usize, value: usize) -> usize {
    if value == 0 {
        return 0;
    }

    (0..grid.size())
        .filter(|&row| grid.cell(row, column) == value)
        .count()
}

/// Counts the occurrences of `value` in the block containing the cell at the
/// given coordinates. A `value` of 0 (empty) is defined to occur zero times.
pub fn count_in_block(grid: &SudokuGrid, row: usize, column: usize,
        value: usize) -> usize {
    if value == 0 {
        return 0;
    }

    let rows = geometry::block_row_bounds(grid.block_height(), row);
    let columns = geometry::block_col_bounds(grid.block_width(), column);
    let mut count = 0;

    for r in rows {
        for c in columns.clone() {
            if grid.cell(r, c) == value {
                count += 1;
            }
        }
    }

    count
}

/// Indicates whether `value` occurs more than once in the row, column or
/// block containing the cell at the given coordinates; any one of the three
/// is sufficient. This is the conflict test for a value that is already
/// present in the cell itself.
pub fn appears_twice(grid: &SudokuGrid, row: usize, column: usize,
        value: usize) -> bool {
    count_in_row(grid, row, value) > 1
        || count_in_col(grid, column, value) > 1
        || count_in_block(grid, row, column, value) > 1
}

/// Indicates whether `value` occurs at all in the row, column or block
/// containing the cell at the given coordinates. This is the candidate
/// exclusion test for an *empty* cell: a value that appears at least once
/// among the neighbours cannot be placed there.
pub fn appears_at_least_once(grid: &SudokuGrid, row: usize, column: usize,
        value: usize) -> bool {
    count_in_row(grid, row, value) > 0
        || count_in_col(grid, column, value) > 0
        || count_in_block(grid, row, column, value) > 0
}

fn refresh_cell(grid: &SudokuGrid, erroneous: &mut [bool], row: usize,
        column: usize) -> bool {
    let value = grid.cell(row, column);
    let conflict = appears_twice(grid, row, column, value);
    erroneous[geometry::flat_index(grid.size(), row, column)] = conflict;
    conflict
}

/// Recomputes the erroneous overlay for exactly the row, column and block
/// containing the cell at the given coordinates. This is the minimal dirty
/// region after a single-cell edit: only cells sharing a constraint group
/// with the edited cell can have changed their conflict status.
///
/// Returns whether any cell in the refreshed region is erroneous.
pub fn refresh_erroneous_region(grid: &SudokuGrid, erroneous: &mut [bool],
        row: usize, column: usize) -> bool {
    let size = grid.size();
    let mut any = false;

    for c in 0..size {
        any |= refresh_cell(grid, erroneous, row, c);
    }

    for r in 0..size {
        any |= refresh_cell(grid, erroneous, r, column);
    }

    let rows = geometry::block_row_bounds(grid.block_height(), row);
    let columns = geometry::block_col_bounds(grid.block_width(), column);

    for r in rows {
        for c in columns.clone() {
            any |= refresh_cell(grid, erroneous, r, c);
        }
    }

    any
}

/// Recomputes the erroneous overlay for the entire grid. Used when arbitrary
/// cells may have changed at once, i.e. on load or after a batch operation.
///
/// Returns whether any cell is erroneous.
pub fn refresh_erroneous_whole(grid: &SudokuGrid, erroneous: &mut [bool])
        -> bool {
    let size = grid.size();
    let mut any = false;

    for row in 0..size {
        for column in 0..size {
            any |= refresh_cell(grid, erroneous, row, column);
        }
    }

    any
}

/// Indicates whether any cell of the given overlay is marked erroneous. Used
/// to gate operations that require a consistent board, such as validation or
/// saving.
pub fn has_any_erroneous(erroneous: &[bool]) -> bool {
    erroneous.iter().any(|&e| e)
}
