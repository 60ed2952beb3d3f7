//! This module contains the error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// The errors that can occur on operations of the board engine, most
/// prominently the mutators on [Board](../struct.Board.html). Errors raised
/// while parsing grid codes are listed separately in
/// [GridParseError](enum.GridParseError.html).
///
/// Note that every mutator validates its input *before* touching any state,
/// so an `Err` always means the board is exactly as it was before the call.
#[derive(Debug, Eq, PartialEq)]
pub enum BoardError {

    /// Indicates that the block dimensions specified for a created board are
    /// invalid. This is the case if either of them is zero.
    InvalidDimensions,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the grid in question. This is the case if they are greater than or
    /// equal to the side length.
    OutOfBounds,

    /// Indicates that some cell value is invalid for the size of the grid in
    /// question. Valid values are `0` (empty) up to and including the side
    /// length.
    InvalidValue,

    /// Indicates that an edit targeted a fixed cell, which ordinary edits
    /// must not alter.
    FixedCell,

    /// Indicates that a generation target (number of clues to keep) exceeds
    /// what the board can provide.
    InvalidTarget,

    /// Indicates that an exhaustive search found no solution for the current
    /// grid. This is a normal outcome of solving, hints and generation, not
    /// a corruption of any kind; callers render it as "unsolvable".
    Unsolvable
}

/// Syntactic sugar for `Result<V, BoardError>`.
pub type BoardResult<V> = Result<V, BoardError>;

/// An enumeration of the errors that may occur when parsing a grid code into
/// a [SudokuGrid](../struct.SudokuGrid.html).
#[derive(Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that the code has the wrong number of parts, which are
    /// separated by semicolons. The code should have two parts: dimensions
    /// and cells (separated by ';'), so if the code does not contain exactly
    /// one semicolon, this error will be returned.
    WrongNumberOfParts,

    /// Indicates that the number of cells (which are separated by commas)
    /// does not equal the number deduced from the dimensions.
    WrongNumberOfCells,

    /// Indicates that the dimensions have the wrong format. They should be of
    /// the form `<block_width>x<block_height>`, so if the amount of 'x's in
    /// the dimension string is not exactly one, this error will be raised.
    MalformedDimensions,

    /// Indicates that the provided dimensions are invalid (i.e. at least one
    /// is zero).
    InvalidDimensions,

    /// Indicates that one of the numbers (dimension or cell content) could
    /// not be parsed.
    NumberFormatError,

    /// Indicates that a cell is filled with an invalid number (more than the
    /// grid size).
    InvalidNumber
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;

impl From<ParseIntError> for GridParseError {
    fn from(_: ParseIntError) -> Self {
        GridParseError::NumberFormatError
    }
}

impl Display for GridParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GridParseError::WrongNumberOfParts =>
                write!(f, "wrong number of semicolon-separated parts"),
            GridParseError::WrongNumberOfCells =>
                write!(f, "wrong number of cells"),
            GridParseError::MalformedDimensions =>
                write!(f, "malformed dimensions"),
            GridParseError::InvalidDimensions =>
                write!(f, "invalid dimensions"),
            GridParseError::NumberFormatError =>
                write!(f, "number format error"),
            GridParseError::InvalidNumber =>
                write!(f, "invalid cell number")
        }
    }
}
