//! This module contains the randomized operations of the engine: completing
//! a grid to a random full solution, generating puzzles with a target clue
//! count, probabilistic hints and the stochastic `guess` partial fill.
//!
//! All randomness flows through a [Generator], which wraps an injected `Rng`
//! so that tests can reproduce exact sequences with a seeded generator. For
//! most cases, sensible defaults are provided by [Generator::new_default].

use crate::{Board, CellChange, SudokuGrid};
use crate::checker;
use crate::error::{BoardError, BoardResult};

use rand::Rng;
use rand::rngs::ThreadRng;

use rand_distr::Bernoulli;

pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    if len < 2 {
        return vec;
    }

    for i in 0..(len - 1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

/// Wraps a random number generator and uses it to complete grids, generate
/// puzzles and make guesses. The backtracking it runs is the same as in the
/// [solver](crate::solver) module, except that candidate values are visited
/// in a freshly shuffled order on every cell, which is what makes repeated
/// calls produce varied boards.
pub struct Generator<R: Rng> {
    rng: R
}

impl Generator<ThreadRng> {

    /// Creates a new generator that uses a [ThreadRng] as its randomness
    /// source.
    pub fn new_default() -> Generator<ThreadRng> {
        Generator::new(rand::thread_rng())
    }
}

impl<R: Rng> Generator<R> {

    /// Creates a new generator that uses the given random number generator.
    pub fn new(rng: R) -> Generator<R> {
        Generator {
            rng
        }
    }

    fn fill_rec(&mut self, grid: &mut SudokuGrid, row: usize, column: usize)
            -> bool {
        let size = grid.size();

        if row == size {
            return true;
        }

        let next_column = (column + 1) % size;
        let next_row = if next_column == 0 { row + 1 } else { row };

        if grid.cell(row, column) != 0 {
            return self.fill_rec(grid, next_row, next_column);
        }

        for value in shuffle(&mut self.rng, 1..=size) {
            if !checker::appears_at_least_once(grid, row, column, value) {
                grid.set(row, column, value).unwrap();

                if self.fill_rec(grid, next_row, next_column) {
                    return true;
                }

                grid.set(row, column, 0).unwrap();
            }
        }

        false
    }

    /// Fills the given grid with random values that keep every row, column
    /// and block free of duplicates and match all already present values.
    /// This is the randomized counterpart of
    /// [solve](crate::solver::solve): the same backtracking, but visiting
    /// candidate values in shuffled order, so repeated calls on an ambiguous
    /// grid may legitimately produce different solutions.
    ///
    /// # Errors
    ///
    /// `BoardError::Unsolvable` if the present values admit no completion.
    /// In that case, the grid remains unchanged.
    pub fn fill(&mut self, grid: &mut SudokuGrid) -> BoardResult<()> {
        if self.fill_rec(grid, 0, 0) {
            Ok(())
        }
        else {
            Err(BoardError::Unsolvable)
        }
    }

    /// Generates a puzzle on the given board: completes the current grid to
    /// a random full solution, then clears uniformly random filled cells
    /// until exactly `target_clues` cells remain filled. The remaining cells
    /// become fixed, and the whole change is recorded as one history batch,
    /// so a single undo reverts it.
    ///
    /// Note that the carved puzzle is *not* re-validated for solution
    /// uniqueness: generation targets a consistent puzzle, not a uniquely
    /// solvable one. Boards carved from the same full solution with fewer
    /// clues simply admit more completions.
    ///
    /// Fixed cells are never cleared by the carving, so their values are
    /// part of every generated puzzle.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidTarget` if `target_clues` exceeds the number of
    /// cells of the board, or is less than the number of fixed cells (which
    /// cannot be carved away).
    /// * `BoardError::Unsolvable` if the current grid admits no completion.
    ///
    /// On any error, the board is unchanged.
    pub fn generate(&mut self, board: &mut Board, target_clues: usize)
            -> BoardResult<()> {
        let area = board.area();
        let mut removable: Vec<usize> = (0..area)
            .filter(|&index| !board.fixed_mask()[index])
            .collect();

        if target_clues > area || area - removable.len() > target_clues {
            return Err(BoardError::InvalidTarget);
        }

        let mut solution = board.grid().clone();
        self.fill(&mut solution)?;

        let size = solution.size();
        let mut removable_len = removable.len();
        let mut filled = area;

        while filled > target_clues {
            let i = self.rng.gen_range(0..removable_len);
            let index = removable[i];
            removable.swap(i, removable_len - 1);
            removable_len -= 1;
            filled -= 1;
            solution.set(index / size, index % size, 0).unwrap();
        }

        let mut edits = Vec::new();

        for row in 0..size {
            for column in 0..size {
                let value = solution.cell(row, column);

                if board.grid().cell(row, column) != value {
                    edits.push(CellChange {
                        row,
                        column,
                        value
                    });
                }
            }
        }

        board.apply_batch(&edits);
        board.mark_filled_as_fixed();
        Ok(())
    }

    /// Computes the value the cell at the given coordinates holds in *some*
    /// solution of the board, without mutating the board. Unlike
    /// [hint](crate::solver::hint), the solution is reached by the
    /// randomized [Generator::fill], so repeated calls may legitimately
    /// return different values for an ambiguous board.
    ///
    /// # Errors
    ///
    /// * `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [Board::size].
    /// * `BoardError::FixedCell` if the target cell is fixed.
    /// * `BoardError::Unsolvable` if the board has no solution.
    pub fn guess_hint(&mut self, board: &Board, row: usize, column: usize)
            -> BoardResult<usize> {
        if board.is_fixed(row, column)? {
            return Err(BoardError::FixedCell);
        }

        let mut scratch = board.grid().clone();
        self.fill(&mut scratch)?;
        Ok(scratch.cell(row, column))
    }

    /// Performs a stochastic partial fill: for every empty, non-fixed cell
    /// in row-major order, each currently legal candidate value passes an
    /// independent Bernoulli draw with success probability `threshold`, and
    /// one of the surviving candidates (if any) is placed, chosen uniformly.
    /// Later cells see the values guessed for earlier ones, so the result
    /// never contains duplicates.
    ///
    /// This is not a solve: with a low threshold few cells are filled, and
    /// even with threshold 1 cells without any legal candidate stay empty.
    /// All guessed cells are committed as one history batch. Returns the
    /// number of cells filled.
    ///
    /// # Errors
    ///
    /// `BoardError::InvalidValue` if `threshold` is not in `[0, 1]`. In that
    /// case, the board is unchanged.
    pub fn guess(&mut self, board: &mut Board, threshold: f64)
            -> BoardResult<usize> {
        let accept = Bernoulli::new(threshold)
            .map_err(|_| BoardError::InvalidValue)?;
        let size = board.size();
        let mut scratch = board.grid().clone();
        let mut edits = Vec::new();

        for row in 0..size {
            for column in 0..size {
                if scratch.cell(row, column) != 0
                        || board.is_fixed(row, column)? {
                    continue;
                }

                let mut accepted = Vec::new();

                for value in 1..=size {
                    if !checker::appears_at_least_once(&scratch, row, column,
                            value) && self.rng.sample(accept) {
                        accepted.push(value);
                    }
                }

                if !accepted.is_empty() {
                    let value =
                        accepted[self.rng.gen_range(0..accepted.len())];
                    scratch.set(row, column, value).unwrap();
                    edits.push(CellChange {
                        row,
                        column,
                        value
                    });
                }
            }
        }

        board.apply_batch(&edits);
        Ok(edits.len())
    }
}
