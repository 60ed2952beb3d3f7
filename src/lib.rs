// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements a Sudoku board engine for interactive sessions. It
//! maintains a grid with blocks of any width and height, detects duplicate
//! values, solves boards exhaustively or partially, generates new puzzles,
//! and supports reversible editing with full undo/redo history.
//!
//! The engine is the core behind a command interpreter: it expects
//! already-validated integers and returns values or typed failures, leaving
//! tokenizing, rendering and file I/O to its callers.
//!
//! Note that the examples below mostly use 4x4 boards (2x2 blocks, digits 1
//! to 4) due to their simpler nature.
//!
//! # Editing a board
//!
//! A [Board] owns the grid together with the fixed-cell mask, the erroneous
//! overlay and the move history. Every committed edit keeps all of them
//! consistent.
//!
//! ```
//! use sudoku_engine::Board;
//!
//! let mut board = Board::new(2, 2).unwrap();
//!
//! board.set_cell(0, 0, 1).unwrap();
//! board.set_cell(0, 1, 1).unwrap();
//!
//! // two 1s in the first row conflict - both are marked
//! assert!(board.is_erroneous(0, 0).unwrap());
//! assert!(board.is_erroneous(0, 1).unwrap());
//!
//! // undo reverts the second edit and clears the marks
//! board.undo();
//! assert!(!board.has_errors());
//! assert_eq!(0, board.get(0, 1).unwrap());
//! ```
//!
//! # Solving
//!
//! The [solver] module counts solutions exhaustively or returns the first
//! one found. An unsolvable board is a normal outcome, not an error.
//!
//! ```
//! use sudoku_engine::{Board, solver};
//!
//! let board = Board::parse("2x2;\
//!     2, , , ,\
//!      , ,3, ,\
//!      , , ,4,\
//!      ,2, , ").unwrap();
//!
//! assert_eq!(1, solver::count_solutions(board.grid()));
//! assert_eq!(Ok(3), solver::hint(&board, 0, 1));
//! ```
//!
//! # Generating
//!
//! The [generator](generator/index.html) module fills boards randomly and
//! carves puzzles with a target clue count. The randomness source is always
//! injected, so tests can reproduce exact sequences.
//!
//! ```
//! use sudoku_engine::Board;
//! use sudoku_engine::generator::Generator;
//!
//! let mut board = Board::new(2, 2).unwrap();
//! let mut generator = Generator::new_default();
//!
//! generator.generate(&mut board, 6).unwrap();
//!
//! assert_eq!(10, board.count_empty());
//! assert!(!board.has_errors());
//! ```
//!
//! # Note regarding performance
//!
//! Exhaustive solution counting explores every branch by design and may be
//! slow on large or deeply ambiguous boards. It is strongly recommended to
//! use at least `opt-level = 2` for tests that solve or generate.

pub mod checker;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod history;
pub mod solver;

use error::{BoardError, BoardResult, GridParseError, GridParseResult};
use history::{History, Move};
use solver::Candidate;

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;

/// A Sudoku grid composed of cells that are organized into blocks of a given
/// width and height in a way that makes the entire grid a square.
/// Consequently, the number of blocks in a row is equal to the block height
/// and vice versa.
///
/// Cells are stored as plain integers in row-major order, where `0` denotes
/// an empty cell and `1` up to the side length denote filled cells. The flat
/// layout is deliberate: row, column and block scans during checking and
/// solving all run over one contiguous buffer, with the index arithmetic
/// kept in the [geometry] module.
///
/// A grid is a plain value; the bookkeeping of fixed cells, duplicate marks
/// and history lives in [Board]. Grids serialize as their code string (see
/// [SudokuGrid::parse]).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
#[serde(try_from = "String")]
pub struct SudokuGrid {
    block_width: usize,
    block_height: usize,
    size: usize,
    cells: Vec<usize>
}

fn parse_dimensions(code: &str) -> Result<(usize, usize), GridParseError> {
    let parts: Vec<&str> = code.split('x').collect();

    if parts.len() != 2 {
        return Err(GridParseError::MalformedDimensions);
    }

    Ok((parts[0].parse()?, parts[1].parse()?))
}

impl SudokuGrid {

    /// Creates a new, empty grid where the blocks have the given dimensions.
    /// The total width and height of the grid will be equal to the product
    /// of `block_width` and `block_height`.
    ///
    /// # Arguments
    ///
    /// * `block_width`: The horizontal dimension of one sub-block of the
    /// grid. For an ordinary Sudoku grid, this is 3. Must be greater than 0.
    /// * `block_height`: The vertical dimension of one sub-block of the
    /// grid. For an ordinary Sudoku grid, this is 3. Must be greater than 0.
    ///
    /// # Errors
    ///
    /// If `block_width` or `block_height` is invalid (zero).
    pub fn new(block_width: usize, block_height: usize)
            -> BoardResult<SudokuGrid> {
        if block_width == 0 || block_height == 0 {
            return Err(BoardError::InvalidDimensions);
        }

        let size = block_width * block_height;

        Ok(SudokuGrid {
            block_width,
            block_height,
            size,
            cells: vec![0; size * size]
        })
    }

    /// Parses a code encoding a grid. The code has to be of the format
    /// `<block_width>x<block_height>;<cells>` where `<cells>` is a
    /// comma-separated list of entries, which are either empty or a number.
    /// The entries are assigned left-to-right, top-to-bottom, where each row
    /// is completed before the next one is started. Whitespace in the
    /// entries is ignored to allow for more intuitive formatting. The number
    /// of entries must match the amount of cells in a grid with the given
    /// dimensions, i.e. it must be `(block_width * block_height)²`.
    ///
    /// As an example, the code `2x2;1, ,2, , ,3, ,4, , , ,3, ,1, ,2` parses
    /// to a 4x4 grid with 1 and 2 in the top row and so on.
    ///
    /// # Errors
    ///
    /// Any specialization of [GridParseError] (see that documentation).
    pub fn parse(code: &str) -> GridParseResult<SudokuGrid> {
        let parts: Vec<&str> = code.split(';').collect();

        if parts.len() != 2 {
            return Err(GridParseError::WrongNumberOfParts);
        }

        let (block_width, block_height) = parse_dimensions(parts[0])?;
        let mut grid = SudokuGrid::new(block_width, block_height)
            .map_err(|_| GridParseError::InvalidDimensions)?;
        let size = grid.size();
        let entries: Vec<&str> = parts[1].split(',').collect();

        if entries.len() != size * size {
            return Err(GridParseError::WrongNumberOfCells);
        }

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let value = entry.parse::<usize>()?;

            if value == 0 || value > size {
                return Err(GridParseError::InvalidNumber);
            }

            grid.cells[i] = value;
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [SudokuGrid::parse]. That is, a grid that is converted to a string
    /// and parsed again will not change.
    pub fn to_parseable_string(&self) -> String {
        let mut s = format!("{}x{};", self.block_width, self.block_height);
        let cells = self.cells.iter()
            .map(|&c| if c == 0 { String::new() } else { c.to_string() })
            .collect::<Vec<String>>()
            .join(",");
        s.push_str(cells.as_str());
        s
    }

    /// Gets the width (number of columns) of one sub-block of the grid.
    pub fn block_width(&self) -> usize {
        self.block_width
    }

    /// Gets the height (number of rows) of one sub-block of the grid.
    pub fn block_height(&self) -> usize {
        self.block_height
    }

    /// Gets the total size of the grid on one axis (horizontally or
    /// vertically). Since a square grid is enforced at construction time,
    /// this is guaranteed to be valid for both axes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the total number of cells in the grid, i.e. the square of
    /// [SudokuGrid::size].
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    /// Gets the content of the cell at the specified position, with `0`
    /// denoting an empty cell.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is not less than [SudokuGrid::size]. Use
    /// [SudokuGrid::get] for a checked variant.
    pub fn cell(&self, row: usize, column: usize) -> usize {
        self.cells[geometry::flat_index(self.size, row, column)]
    }

    /// Gets the content of the cell at the specified position, with `0`
    /// denoting an empty cell.
    ///
    /// # Errors
    ///
    /// `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [SudokuGrid::size].
    pub fn get(&self, row: usize, column: usize) -> BoardResult<usize> {
        if row >= self.size || column >= self.size {
            Err(BoardError::OutOfBounds)
        }
        else {
            Ok(self.cell(row, column))
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// value, where `0` clears the cell. If the cell was not empty, the old
    /// value is overwritten.
    ///
    /// # Errors
    ///
    /// * `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [SudokuGrid::size].
    /// * `BoardError::InvalidValue` if `value` is greater than
    /// [SudokuGrid::size].
    pub fn set(&mut self, row: usize, column: usize, value: usize)
            -> BoardResult<()> {
        if row >= self.size || column >= self.size {
            return Err(BoardError::OutOfBounds);
        }

        if value > self.size {
            return Err(BoardError::InvalidValue);
        }

        self.cells[geometry::flat_index(self.size, row, column)] = value;
        Ok(())
    }

    /// Counts the empty (zero) cells of the grid.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    /// Indicates whether the grid is full, i.e. no cell is empty.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|&c| c == 0)
    }

    /// Gets the flat, row-major cell buffer of this grid. This is the shape
    /// in which the load/save layer exchanges grids with the engine.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

impl From<SudokuGrid> for String {
    fn from(grid: SudokuGrid) -> String {
        grid.to_parseable_string()
    }
}

impl TryFrom<String> for SudokuGrid {
    type Error = GridParseError;

    fn try_from(code: String) -> GridParseResult<SudokuGrid> {
        SudokuGrid::parse(code.as_str())
    }
}

/// One cell mutation as reported back by [Board::undo], [Board::redo] and
/// [Board::reset_to_initial], for the caller to re-render.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CellChange {

    /// The row of the changed cell.
    pub row: usize,

    /// The column of the changed cell.
    pub column: usize,

    /// The value the cell now holds, possibly 0 for a cleared cell.
    pub value: usize
}

/// The central entity of the engine: a [SudokuGrid] together with the
/// fixed-cell mask, the erroneous overlay, the empty-cell counter and the
/// move [History].
///
/// The board is the only place these are mutated, and every public mutator
/// keeps them consistent as one atomic step: after any call returns, the
/// counter equals the number of zero cells, the overlay reflects the grid,
/// and the history records exactly the committed edits. Mutators validate
/// all input before touching state, so a failed call changes nothing.
///
/// A fixed cell is never mutated by [Board::set_cell], [Board::autofill] or
/// generation. Undo and redo bypass the fixed check deliberately, since they
/// only replay edits that were once committed.
#[derive(Clone, Debug)]
pub struct Board {
    grid: SudokuGrid,
    fixed: Vec<bool>,
    erroneous: Vec<bool>,
    empty_cells: usize,
    history: History
}

impl Board {

    /// Creates a new board with an empty grid whose blocks have the given
    /// dimensions. No cell is fixed and the history is empty.
    ///
    /// # Errors
    ///
    /// If `block_width` or `block_height` is invalid (zero).
    pub fn new(block_width: usize, block_height: usize) -> BoardResult<Board> {
        Ok(Board::from_grid(SudokuGrid::new(block_width, block_height)?))
    }

    /// Creates a board owning the given grid. No cell is fixed, the
    /// erroneous overlay and the empty-cell counter are computed from the
    /// grid, and the history is empty.
    pub fn from_grid(grid: SudokuGrid) -> Board {
        let area = grid.area();
        let empty_cells = grid.count_empty();
        let mut erroneous = vec![false; area];
        checker::refresh_erroneous_whole(&grid, &mut erroneous);

        Board {
            grid,
            fixed: vec![false; area],
            erroneous,
            empty_cells,
            history: History::new()
        }
    }

    /// Parses a grid code (see [SudokuGrid::parse]) and wraps the result in
    /// a board with no fixed cells and empty history.
    ///
    /// # Errors
    ///
    /// If the parsing fails. See [SudokuGrid::parse] for further
    /// information.
    pub fn parse(code: &str) -> GridParseResult<Board> {
        Ok(Board::from_grid(SudokuGrid::parse(code)?))
    }

    /// Gets a reference to the grid of this board.
    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    /// Gets the side length of the board, i.e. the number of rows, columns
    /// and blocks.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Gets the total number of cells of the board.
    pub fn area(&self) -> usize {
        self.grid.area()
    }

    /// Gets the content of the cell at the specified position, with `0`
    /// denoting an empty cell.
    ///
    /// # Errors
    ///
    /// `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [Board::size].
    pub fn get(&self, row: usize, column: usize) -> BoardResult<usize> {
        self.grid.get(row, column)
    }

    /// Indicates whether the cell at the specified position is fixed, i.e.
    /// immutable by ordinary edits.
    ///
    /// # Errors
    ///
    /// `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [Board::size].
    pub fn is_fixed(&self, row: usize, column: usize) -> BoardResult<bool> {
        self.check_bounds(row, column)?;
        Ok(self.fixed[geometry::flat_index(self.size(), row, column)])
    }

    /// Indicates whether the cell at the specified position currently
    /// duplicates another value in its row, column or block.
    ///
    /// # Errors
    ///
    /// `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [Board::size].
    pub fn is_erroneous(&self, row: usize, column: usize)
            -> BoardResult<bool> {
        self.check_bounds(row, column)?;
        Ok(self.erroneous[geometry::flat_index(self.size(), row, column)])
    }

    /// Indicates whether any cell of the board is currently erroneous. Used
    /// by callers to gate validation and saving.
    pub fn has_errors(&self) -> bool {
        checker::has_any_erroneous(&self.erroneous)
    }

    /// Gets the number of empty cells. This is maintained transactionally
    /// with every mutation, never recounted.
    pub fn count_empty(&self) -> usize {
        self.empty_cells
    }

    /// Indicates whether `value` is in the legal range for cells of this
    /// board, i.e. `0` (empty) up to and including [Board::size].
    pub fn is_legal_value(&self, value: usize) -> bool {
        value <= self.size()
    }

    /// Gets the fixed-cell mask in the same flat, row-major layout as
    /// [SudokuGrid::cells]. Together they form the save contract of the
    /// engine.
    pub fn fixed_mask(&self) -> &[bool] {
        &self.fixed
    }

    /// Creates a grid containing only the fixed cells of this board, with
    /// all other cells empty. This is the puzzle as originally posed,
    /// without any of the session's edits.
    pub fn fixed_cells(&self) -> SudokuGrid {
        let size = self.size();
        let mut result = SudokuGrid {
            block_width: self.grid.block_width(),
            block_height: self.grid.block_height(),
            size,
            cells: vec![0; self.area()]
        };

        for index in 0..self.area() {
            if self.fixed[index] {
                result.cells[index] = self.grid.cells[index];
            }
        }

        result
    }

    /// Indicates whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_at_start()
    }

    /// Indicates whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.history.is_at_end()
    }

    fn check_bounds(&self, row: usize, column: usize) -> BoardResult<()> {
        if row >= self.size() || column >= self.size() {
            Err(BoardError::OutOfBounds)
        }
        else {
            Ok(())
        }
    }

    /// Writes a cell and keeps the empty-cell counter in sync. Does not
    /// touch history or the erroneous overlay; coordinates and value must
    /// already be validated.
    pub(crate) fn write_cell(&mut self, row: usize, column: usize,
            value: usize) -> usize {
        let index = geometry::flat_index(self.size(), row, column);
        let previous = self.grid.cells[index];

        if previous == 0 && value != 0 {
            self.empty_cells -= 1;
        }
        else if previous != 0 && value == 0 {
            self.empty_cells += 1;
        }

        self.grid.cells[index] = value;
        previous
    }

    /// Sets the content of the cell at the specified position to the given
    /// value, where `0` clears the cell. On success, the edit has been
    /// committed to the history (discarding any redo branch), the empty-cell
    /// counter is updated and the erroneous overlay is refreshed for the
    /// row, column and block of the cell.
    ///
    /// # Errors
    ///
    /// * `BoardError::OutOfBounds` if `row` or `column` is not less than
    /// [Board::size].
    /// * `BoardError::InvalidValue` if `value` is greater than
    /// [Board::size].
    /// * `BoardError::FixedCell` if the target cell is fixed.
    ///
    /// On any error, the board is unchanged.
    pub fn set_cell(&mut self, row: usize, column: usize, value: usize)
            -> BoardResult<()> {
        self.check_bounds(row, column)?;

        if !self.is_legal_value(value) {
            return Err(BoardError::InvalidValue);
        }

        if self.fixed[geometry::flat_index(self.size(), row, column)] {
            return Err(BoardError::FixedCell);
        }

        let previous = self.write_cell(row, column, value);
        self.history.commit(row, column, value, previous);
        checker::refresh_erroneous_region(&self.grid, &mut self.erroneous,
            row, column);
        Ok(())
    }

    fn apply_moves(&mut self, moves: &[Move], use_old_value: bool)
            -> Vec<CellChange> {
        let mut changes = Vec::with_capacity(moves.len());

        for &m in moves {
            if let Move::Edit { row, column, new_value, old_value } = m {
                let value = if use_old_value { old_value } else { new_value };
                self.write_cell(row, column, value);
                changes.push(CellChange {
                    row,
                    column,
                    value
                });
            }
        }

        for change in &changes {
            checker::refresh_erroneous_region(&self.grid,
                &mut self.erroneous, change.row, change.column);
        }

        changes
    }

    /// Reverts the most recent logical step of the history: a single edit,
    /// or a whole batch for multi-cell operations such as autofill or
    /// generation. Returns the changed cells for re-display; the vector is
    /// empty if there was nothing to undo.
    pub fn undo(&mut self) -> Vec<CellChange> {
        let moves = self.history.undo();
        self.apply_moves(&moves, true)
    }

    /// Re-applies the next logical step of the history, symmetric to
    /// [Board::undo]. Returns the changed cells for re-display; the vector
    /// is empty if there was nothing to redo.
    pub fn redo(&mut self) -> Vec<CellChange> {
        let moves = self.history.redo();
        self.apply_moves(&moves, false)
    }

    /// Rewinds the board to its initial state by reverting every applied
    /// move. Unlike an ordinary edit mid-history, this discards nothing; the
    /// whole session remains redoable. Returns the changed cells for
    /// re-display.
    pub fn reset_to_initial(&mut self) -> Vec<CellChange> {
        let moves = self.history.reset_to_initial();
        let changes = self.apply_moves(&moves, true);
        checker::refresh_erroneous_whole(&self.grid, &mut self.erroneous);
        changes
    }

    /// Replaces the full state of the board with the given cell buffer and
    /// fixed mask, both in the flat, row-major layout of
    /// [SudokuGrid::cells]. The empty-cell counter and the erroneous overlay
    /// are recomputed from scratch and the history is reset to empty. This
    /// is the load contract of the engine.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidDimensions` if either buffer does not have
    /// exactly [Board::area] entries.
    /// * `BoardError::InvalidValue` if any cell value is greater than
    /// [Board::size].
    ///
    /// On any error, the board is unchanged.
    pub fn load_from(&mut self, cells: &[usize], fixed: &[bool])
            -> BoardResult<()> {
        if cells.len() != self.area() || fixed.len() != self.area() {
            return Err(BoardError::InvalidDimensions);
        }

        if cells.iter().any(|&c| c > self.size()) {
            return Err(BoardError::InvalidValue);
        }

        self.grid.cells.copy_from_slice(cells);
        self.fixed.copy_from_slice(fixed);
        self.empty_cells = self.grid.count_empty();
        checker::refresh_erroneous_whole(&self.grid, &mut self.erroneous);
        self.history = History::new();
        Ok(())
    }

    /// Applies a set of edits as one separator-wrapped history batch, so a
    /// single undo reverts all of them. The erroneous overlay is refreshed
    /// for the whole grid afterwards. An empty edit list leaves the board
    /// and the history untouched.
    ///
    /// Coordinates and values must already be validated by the caller.
    pub(crate) fn apply_batch(&mut self, edits: &[CellChange]) {
        if edits.is_empty() {
            return;
        }

        self.history.commit_separator();

        for edit in edits {
            let previous = self.write_cell(edit.row, edit.column, edit.value);
            self.history.commit(edit.row, edit.column, edit.value, previous);
        }

        self.history.commit_separator();
        checker::refresh_erroneous_whole(&self.grid, &mut self.erroneous);
    }

    /// Marks every currently filled cell as fixed and every empty cell as
    /// not fixed. Generation uses this to freeze the carved puzzle.
    pub(crate) fn mark_filled_as_fixed(&mut self) {
        for index in 0..self.area() {
            self.fixed[index] = self.grid.cells[index] != 0;
        }
    }

    /// Fills every empty, non-fixed cell that has exactly one legal
    /// candidate with that candidate. Candidates are computed against the
    /// state of the grid *before* the operation, so cells filled by the same
    /// autofill do not exclude each other's candidates. Cells with zero or
    /// multiple candidates are left untouched.
    ///
    /// All resulting edits are committed as one batch, so one undo reverts
    /// the whole autofill. Returns the number of cells filled.
    pub fn autofill(&mut self) -> usize {
        let size = self.size();
        let mut edits = Vec::new();

        for row in 0..size {
            for column in 0..size {
                let index = geometry::flat_index(size, row, column);

                if self.grid.cells[index] != 0 || self.fixed[index] {
                    continue;
                }

                if let Candidate::Unique(value) =
                        solver::unique_candidate(&self.grid, row, column) {
                    edits.push(CellChange {
                        row,
                        column,
                        value
                    });
                }
            }
        }

        self.apply_batch(&edits);
        edits.len()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parse_ok() {
        let board = Board::parse("2x2; 1,,,2, ,3,,4, ,2,,, 3,,,").unwrap();

        assert_eq!(4, board.size());
        assert_eq!(16, board.area());
        assert_eq!(Ok(1), board.get(0, 0));
        assert_eq!(Ok(0), board.get(0, 1));
        assert_eq!(Ok(2), board.get(0, 3));
        assert_eq!(Ok(3), board.get(1, 1));
        assert_eq!(Ok(4), board.get(1, 3));
        assert_eq!(Ok(2), board.get(2, 1));
        assert_eq!(Ok(3), board.get(3, 0));
        assert_eq!(10, board.count_empty());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Err(GridParseError::MalformedDimensions),
            SudokuGrid::parse("2x2x2;,,,,,,,,,,,,,,,"));
        assert_eq!(Err(GridParseError::InvalidDimensions),
            SudokuGrid::parse("2x0;,"));
        assert_eq!(Err(GridParseError::WrongNumberOfParts),
            SudokuGrid::parse("2x2;,,,,,,,,,,,,,,,;whatever"));
        assert_eq!(Err(GridParseError::NumberFormatError),
            SudokuGrid::parse("2x#;,"));
        assert_eq!(Err(GridParseError::InvalidNumber),
            SudokuGrid::parse("2x2;,,,4,,,5,,,,,,,,,"));
        assert_eq!(Err(GridParseError::WrongNumberOfCells),
            SudokuGrid::parse("2x2;1,2,3,4,1,2,3,4,1,2,3,4,1,2,3"));
    }

    #[test]
    fn grid_string_round_trip() {
        let mut grid = SudokuGrid::new(3, 2).unwrap();
        grid.set(1, 1, 4).unwrap();
        grid.set(2, 1, 5).unwrap();

        let code = grid.to_parseable_string();

        assert_eq!(grid, SudokuGrid::parse(code.as_str()).unwrap());
    }

    #[test]
    fn grid_serializes_as_code() {
        let grid = SudokuGrid::parse("2x2;1,,,,,2,,,,,3,,,,,4").unwrap();
        let json = serde_json::to_string(&grid).unwrap();

        assert_eq!("\"2x2;1,,,,,2,,,,,3,,,,,4\"", json);
        assert_eq!(grid,
            serde_json::from_str::<SudokuGrid>(json.as_str()).unwrap());
    }

    #[test]
    fn set_cell_tracks_empty_count_and_overlay() {
        // two 1s in the same row mark both cells, undo clears them again

        let mut board = Board::new(2, 2).unwrap();

        assert_eq!(16, board.count_empty());

        board.set_cell(0, 0, 1).unwrap();

        assert_eq!(15, board.count_empty());
        assert_eq!(Ok(1), board.get(0, 0));
        assert!(!board.is_erroneous(0, 0).unwrap());

        board.set_cell(0, 1, 1).unwrap();

        assert!(board.is_erroneous(0, 0).unwrap());
        assert!(board.is_erroneous(0, 1).unwrap());

        let changes = board.undo();

        assert_eq!(vec![CellChange { row: 0, column: 1, value: 0 }], changes);
        assert_eq!(Ok(0), board.get(0, 1));
        assert_eq!(15, board.count_empty());
        assert!(!board.has_errors());
    }

    #[test]
    fn set_cell_validates_before_mutating() {
        let mut board = Board::parse("2x2;1,,,,,,,,,,,,,,,").unwrap();

        assert_eq!(Err(BoardError::OutOfBounds), board.set_cell(4, 0, 1));
        assert_eq!(Err(BoardError::InvalidValue), board.set_cell(0, 1, 5));
        assert_eq!(15, board.count_empty());
        assert!(!board.can_undo());
    }

    #[test]
    fn fixed_cell_rejects_edit() {
        let mut board = Board::new(2, 2).unwrap();
        let cells = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut fixed = [false; 16];
        fixed[0] = true;
        board.load_from(&cells, &fixed).unwrap();

        assert_eq!(Err(BoardError::FixedCell), board.set_cell(0, 0, 2));
        assert_eq!(Ok(1), board.get(0, 0));
        assert!(board.is_fixed(0, 0).unwrap());
        assert!(!board.is_fixed(0, 1).unwrap());
    }

    #[test]
    fn undo_then_redo_restores_exact_state() {
        let mut board = Board::parse("2x2;1,,,,,,,,,,,,,,,").unwrap();
        board.set_cell(1, 1, 1).unwrap();

        let grid_before = board.grid().clone();
        let erroneous_before: Vec<bool> = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .map(|(r, c)| board.is_erroneous(r, c).unwrap())
            .collect();

        board.undo();
        let changes = board.redo();

        assert_eq!(vec![CellChange { row: 1, column: 1, value: 1 }], changes);
        assert_eq!(&grid_before, board.grid());

        let erroneous_after: Vec<bool> = (0..4)
            .flat_map(|r| (0..4).map(move |c| (r, c)))
            .map(|(r, c)| board.is_erroneous(r, c).unwrap())
            .collect();

        assert_eq!(erroneous_before, erroneous_after);
    }

    #[test]
    fn commit_mid_history_discards_redo_branch() {
        let mut board = Board::new(2, 2).unwrap();
        board.set_cell(0, 0, 1).unwrap();
        board.set_cell(0, 1, 2).unwrap();
        board.undo();
        board.undo();
        board.set_cell(3, 3, 4).unwrap();

        // redo of the new edit's undo works once, then the log is exhausted
        board.undo();

        assert!(!board.redo().is_empty());
        assert!(board.redo().is_empty());
        assert_eq!(Ok(0), board.get(0, 0));
        assert_eq!(Ok(0), board.get(0, 1));
        assert_eq!(Ok(4), board.get(3, 3));
    }

    #[test]
    fn reset_to_initial_rewinds_everything() {
        let mut board = Board::parse("2x2;1,,,,,,,,,,,,,,,").unwrap();
        board.set_cell(0, 1, 2).unwrap();
        board.set_cell(2, 2, 3).unwrap();
        board.autofill();

        let changes = board.reset_to_initial();

        assert!(!changes.is_empty());
        assert_eq!(SudokuGrid::parse("2x2;1,,,,,,,,,,,,,,,").unwrap(),
            *board.grid());
        assert_eq!(15, board.count_empty());

        // nothing was discarded, the session replays forward
        assert!(!board.redo().is_empty());
    }

    #[test]
    fn load_from_replaces_state_and_history() {
        let mut board = Board::new(2, 2).unwrap();
        board.set_cell(0, 0, 1).unwrap();

        let cells = [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];
        let fixed = [false; 16];
        board.load_from(&cells, &fixed).unwrap();

        assert_eq!(13, board.count_empty());
        assert!(board.is_erroneous(0, 0).unwrap());
        assert!(board.is_erroneous(0, 1).unwrap());
        assert!(!board.is_erroneous(3, 3).unwrap());
        assert!(!board.can_undo());
        assert!(!board.can_redo());
    }

    #[test]
    fn load_from_validates_buffers() {
        let mut board = Board::new(2, 2).unwrap();

        assert_eq!(Err(BoardError::InvalidDimensions),
            board.load_from(&[0; 15], &[false; 16]));
        assert_eq!(Err(BoardError::InvalidValue),
            board.load_from(&[5; 16], &[false; 16]));
    }

    #[test]
    fn autofill_fills_unique_candidates_only() {
        // the top-left block misses only the 4; every other empty cell has
        // several candidates

        let mut board = Board::parse("2x2;\
            1,2, , ,\
            3, ,2, ,\
             , , , ,\
             , , , ").unwrap();
        let filled = board.autofill();

        assert_eq!(1, filled);
        assert_eq!(Ok(4), board.get(1, 1));
        assert!(!board.has_errors());
    }

    #[test]
    fn autofill_is_one_undo_step() {
        let mut board = Board::parse("2x2;\
            1,2, ,4,\
            3, , , ,\
             , , , ,\
             , , , ").unwrap();
        let before = board.grid().clone();
        let filled = board.autofill();

        assert!(filled > 1);

        board.undo();

        assert_eq!(before, *board.grid());
    }

    #[test]
    fn autofill_without_candidates_commits_nothing() {
        let mut board = Board::new(2, 2).unwrap();

        // on an empty board every cell has four candidates
        assert_eq!(0, board.autofill());
        assert!(!board.can_undo());
    }

    #[test]
    fn fixed_cells_exports_original_puzzle() {
        let mut board = Board::new(2, 2).unwrap();
        let cells = [1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut fixed = [false; 16];
        fixed[0] = true;
        board.load_from(&cells, &fixed).unwrap();

        let puzzle = board.fixed_cells();

        assert_eq!(1, puzzle.cell(0, 0));
        assert_eq!(0, puzzle.cell(0, 3));
        assert_eq!(15, puzzle.count_empty());
    }

    #[test]
    fn empty_count_invariant_under_random_editing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut board = Board::new(2, 2).unwrap();

        for _ in 0..500 {
            match rng.gen_range(0..4) {
                0 | 1 => {
                    let row = rng.gen_range(0..4);
                    let column = rng.gen_range(0..4);
                    let value = rng.gen_range(0..=4);
                    board.set_cell(row, column, value).unwrap();
                },
                2 => {
                    board.undo();
                },
                _ => {
                    board.redo();
                }
            }

            assert_eq!(board.grid().count_empty(), board.count_empty());
        }
    }
}
