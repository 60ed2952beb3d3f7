//! This module contains the pure index arithmetic shared by the rest of the
//! crate: mapping `(row, column)` pairs to flat cell indices and computing
//! the boundaries of the block a cell belongs to.
//!
//! All functions here are stateless and have no error conditions; callers
//! are expected to pass pre-validated coordinates.

use std::ops::Range;

/// Computes the index of the cell at the given coordinates in a flat,
/// row-major cell buffer of a square grid with the given side length.
pub fn flat_index(size: usize, row: usize, column: usize) -> usize {
    row * size + column
}

/// Computes the half-open range of rows spanned by the block containing the
/// given row. Blocks are `block_height` rows tall, so for `block_height = 2`
/// the rows 0 and 1 both yield `0..2`.
pub fn block_row_bounds(block_height: usize, row: usize) -> Range<usize> {
    let low = (row / block_height) * block_height;
    low..(low + block_height)
}

/// Computes the half-open range of columns spanned by the block containing
/// the given column. Blocks are `block_width` columns wide.
pub fn block_col_bounds(block_width: usize, column: usize) -> Range<usize> {
    let low = (column / block_width) * block_width;
    low..(low + block_width)
}

/// Computes the coordinates of the top-left cell of the block with the given
/// number, where blocks are enumerated in raster order (left-to-right,
/// top-to-bottom). For a grid with `block_height` m and `block_width` n,
/// there are m blocks in each band of rows, so `block` must be less than
/// `m * n`.
pub fn first_cell_of_block(block_width: usize, block_height: usize,
        block: usize) -> (usize, usize) {
    let row = block_height * (block / block_height);
    let column = block_width * (block % block_height);
    (row, column)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn flat_index_is_row_major() {
        assert_eq!(0, flat_index(6, 0, 0));
        assert_eq!(5, flat_index(6, 0, 5));
        assert_eq!(6, flat_index(6, 1, 0));
        assert_eq!(35, flat_index(6, 5, 5));
    }

    #[test]
    fn block_bounds_cover_their_band() {
        // 3x2 blocks: 2 rows tall, 3 columns wide

        assert_eq!(0..2, block_row_bounds(2, 0));
        assert_eq!(0..2, block_row_bounds(2, 1));
        assert_eq!(2..4, block_row_bounds(2, 2));
        assert_eq!(4..6, block_row_bounds(2, 5));

        assert_eq!(0..3, block_col_bounds(3, 0));
        assert_eq!(0..3, block_col_bounds(3, 2));
        assert_eq!(3..6, block_col_bounds(3, 3));
        assert_eq!(3..6, block_col_bounds(3, 5));
    }

    #[test]
    fn block_enumeration_covers_grid_once() {
        // Every cell of a 6x6 grid (3x2 blocks) must lie in exactly one of
        // the 6 enumerated blocks.

        let block_width = 3;
        let block_height = 2;
        let size = block_width * block_height;
        let mut covered = vec![0u32; size * size];

        for block in 0..size {
            let (row, column) =
                first_cell_of_block(block_width, block_height, block);

            for r in row..(row + block_height) {
                for c in column..(column + block_width) {
                    covered[flat_index(size, r, c)] += 1;
                }
            }
        }

        assert!(covered.iter().all(|&count| count == 1));
    }

    #[test]
    fn first_cell_of_block_raster_order() {
        // 2x2 blocks in a 4x4 grid

        assert_eq!((0, 0), first_cell_of_block(2, 2, 0));
        assert_eq!((0, 2), first_cell_of_block(2, 2, 1));
        assert_eq!((2, 0), first_cell_of_block(2, 2, 2));
        assert_eq!((2, 2), first_cell_of_block(2, 2, 3));
    }
}
