//! This module contains the move history which backs undo and redo on a
//! [Board](../struct.Board.html).
//!
//! The history is an ordered log of [Move]s with a cursor that points just
//! past the most recently applied move (`cursor == 0` meaning "before the
//! first move"). Multi-cell operations such as autofill or generation are
//! recorded as a *batch*: their edits are wrapped between two
//! [Move::Separator] entries, and undo/redo cross a whole batch in one step.
//!
//! Committing a new move while the cursor is not at the end of the log
//! discards everything after the cursor; undo history forks are not
//! preserved.
//!
//! History operations never fail. Undoing at the start or redoing at the end
//! of the log is a no-op that reports no affected moves.

/// A single entry in the move history.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Move {

    /// One committed cell mutation. `old_value` is the content the cell had
    /// before the edit, which undo restores.
    Edit {

        /// The row of the edited cell.
        row: usize,

        /// The column of the edited cell.
        column: usize,

        /// The value the edit wrote, possibly 0 for a cleared cell.
        new_value: usize,

        /// The value the cell held before the edit.
        old_value: usize
    },

    /// A batch delimiter. It changes no cell itself; a batch of edits is
    /// always wrapped between two separators.
    Separator
}

/// The move log of one board, with a cursor marking how much of it is
/// currently applied.
///
/// The cursor only ever rests on a batch boundary: either between two
/// batches, next to a single edit, or at one of the ends of the log. This
/// holds because single edits and whole batches are the only commit units
/// and undo/redo always cross a complete unit.
#[derive(Clone, Debug)]
pub struct History {
    moves: Vec<Move>,
    cursor: usize
}

impl History {

    /// Creates a new, empty history with the cursor before the first (not
    /// yet existing) move.
    pub fn new() -> History {
        History {
            moves: Vec::new(),
            cursor: 0
        }
    }

    /// Indicates whether the cursor is at the start of the log, i.e. there
    /// is nothing to undo.
    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Indicates whether the cursor is at the end of the log, i.e. there is
    /// nothing to redo.
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.moves.len()
    }

    /// Gets the total number of entries in the log, including separators and
    /// any not-currently-applied (redoable) suffix.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Indicates whether the log contains no entries at all.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Discards all moves after the cursor. This is invoked by every commit,
    /// implementing the rule that a fresh edit mid-history prunes the redo
    /// branch.
    pub fn truncate_forward(&mut self) {
        self.moves.truncate(self.cursor);
    }

    /// Appends one cell edit as the new last move and advances the cursor to
    /// it. If the cursor was not at the end of the log, the entire suffix
    /// after it is discarded first.
    pub fn commit(&mut self, row: usize, column: usize, new_value: usize,
            old_value: usize) {
        self.truncate_forward();
        self.moves.push(Move::Edit {
            row,
            column,
            new_value,
            old_value
        });
        self.cursor += 1;
    }

    /// Appends a batch delimiter and advances the cursor past it. Like
    /// [History::commit], this discards the redo branch first.
    pub fn commit_separator(&mut self) {
        self.truncate_forward();
        self.moves.push(Move::Separator);
        self.cursor += 1;
    }

    /// Moves the cursor backward across one logical step and returns the
    /// edits that step consists of, in the order they must be reverted
    /// (most recent first). A logical step is a single edit, or a whole
    /// separator-wrapped batch if the move before the cursor is a separator.
    /// A batch whose opening separator is missing ends at the start of the
    /// log instead.
    ///
    /// If the cursor is at the start of the log, nothing happens and an
    /// empty vector is returned.
    pub fn undo(&mut self) -> Vec<Move> {
        let mut undone = Vec::new();

        if self.is_at_start() {
            return undone;
        }

        if self.moves[self.cursor - 1] == Move::Separator {
            // closing separator of a batch
            self.cursor -= 1;

            while self.cursor > 0
                    && matches!(self.moves[self.cursor - 1],
                        Move::Edit { .. }) {
                undone.push(self.moves[self.cursor - 1]);
                self.cursor -= 1;
            }

            // opening separator, unless the batch runs into the log start
            if self.cursor > 0 {
                self.cursor -= 1;
            }
        }
        else {
            undone.push(self.moves[self.cursor - 1]);
            self.cursor -= 1;
        }

        undone
    }

    /// Moves the cursor forward across one logical step and returns the
    /// edits that step consists of, in the order they must be re-applied
    /// (oldest first). A logical step is a single edit, or a whole
    /// separator-wrapped batch if the move at the cursor is a separator. A
    /// batch whose closing separator is missing ends at the end of the log
    /// instead.
    ///
    /// If the cursor is at the end of the log, nothing happens and an empty
    /// vector is returned.
    pub fn redo(&mut self) -> Vec<Move> {
        let mut redone = Vec::new();

        if self.is_at_end() {
            return redone;
        }

        if self.moves[self.cursor] == Move::Separator {
            // opening separator of a batch
            self.cursor += 1;

            while self.cursor < self.moves.len()
                    && matches!(self.moves[self.cursor], Move::Edit { .. }) {
                redone.push(self.moves[self.cursor]);
                self.cursor += 1;
            }

            // closing separator, unless the batch runs into the log end
            if self.cursor < self.moves.len() {
                self.cursor += 1;
            }
        }
        else {
            redone.push(self.moves[self.cursor]);
            self.cursor += 1;
        }

        redone
    }

    /// Rewinds the cursor all the way to the start of the log and returns
    /// every currently applied edit, in the order they must be reverted
    /// (most recent first). Unlike committing mid-history, this discards
    /// nothing: the entire log remains redoable afterwards.
    pub fn reset_to_initial(&mut self) -> Vec<Move> {
        let mut undone = Vec::new();

        while self.cursor > 0 {
            if let Move::Edit { .. } = self.moves[self.cursor - 1] {
                undone.push(self.moves[self.cursor - 1]);
            }

            self.cursor -= 1;
        }

        undone
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn edit(row: usize, column: usize, new_value: usize, old_value: usize)
            -> Move {
        Move::Edit {
            row,
            column,
            new_value,
            old_value
        }
    }

    #[test]
    fn new_history_navigation_is_noop() {
        let mut history = History::new();

        assert!(history.is_at_start());
        assert!(history.is_at_end());
        assert!(history.undo().is_empty());
        assert!(history.redo().is_empty());
        assert!(history.reset_to_initial().is_empty());
    }

    #[test]
    fn undo_and_redo_single_edits() {
        let mut history = History::new();
        history.commit(0, 0, 1, 0);
        history.commit(1, 2, 3, 0);

        assert_eq!(vec![edit(1, 2, 3, 0)], history.undo());
        assert_eq!(vec![edit(0, 0, 1, 0)], history.undo());
        assert!(history.is_at_start());
        assert!(history.undo().is_empty());

        assert_eq!(vec![edit(0, 0, 1, 0)], history.redo());
        assert_eq!(vec![edit(1, 2, 3, 0)], history.redo());
        assert!(history.is_at_end());
        assert!(history.redo().is_empty());
    }

    #[test]
    fn batch_crossed_in_one_step() {
        let mut history = History::new();
        history.commit(0, 0, 1, 0);
        history.commit_separator();
        history.commit(1, 0, 2, 0);
        history.commit(1, 1, 3, 0);
        history.commit_separator();

        let undone = history.undo();

        assert_eq!(vec![edit(1, 1, 3, 0), edit(1, 0, 2, 0)], undone);

        let redone = history.redo();

        assert_eq!(vec![edit(1, 0, 2, 0), edit(1, 1, 3, 0)], redone);
        assert!(history.is_at_end());
    }

    #[test]
    fn commit_mid_history_prunes_redo_branch() {
        let mut history = History::new();
        history.commit(0, 0, 1, 0);
        history.commit(0, 1, 2, 0);
        history.undo();
        history.undo();
        history.commit(3, 3, 4, 0);

        // the pre-undo branch is gone
        assert_eq!(vec![edit(3, 3, 4, 0)], history.undo());
        assert_eq!(vec![edit(3, 3, 4, 0)], history.redo());
        assert!(history.redo().is_empty());
        assert_eq!(1, history.len());
    }

    #[test]
    fn reset_keeps_log_redoable() {
        let mut history = History::new();
        history.commit(0, 0, 1, 0);
        history.commit_separator();
        history.commit(1, 0, 2, 0);
        history.commit_separator();

        let undone = history.reset_to_initial();

        assert_eq!(vec![edit(1, 0, 2, 0), edit(0, 0, 1, 0)], undone);
        assert!(history.is_at_start());
        assert_eq!(3, history.len());

        assert_eq!(vec![edit(0, 0, 1, 0)], history.redo());
        assert_eq!(vec![edit(1, 0, 2, 0)], history.redo());
        assert!(history.is_at_end());
    }

    #[test]
    fn lone_separator_is_crossed_without_edits() {
        let mut history = History::new();
        history.commit_separator();

        assert!(history.undo().is_empty());
        assert!(history.is_at_start());

        assert!(history.redo().is_empty());
        assert!(history.is_at_end());
    }

    #[test]
    fn unterminated_batch_ends_at_log_boundary() {
        let mut history = History::new();
        history.commit(0, 0, 1, 0);
        history.commit_separator();

        assert_eq!(vec![edit(0, 0, 1, 0)], history.undo());
        assert!(history.is_at_start());

        // forward, the edit and the lone separator are separate steps
        assert_eq!(vec![edit(0, 0, 1, 0)], history.redo());
        assert!(history.redo().is_empty());
        assert!(history.is_at_end());
    }

    #[test]
    fn consecutive_batches_stay_separate() {
        let mut history = History::new();
        history.commit_separator();
        history.commit(0, 0, 1, 0);
        history.commit_separator();
        history.commit_separator();
        history.commit(1, 1, 2, 0);
        history.commit_separator();

        assert_eq!(vec![edit(1, 1, 2, 0)], history.undo());
        assert_eq!(vec![edit(0, 0, 1, 0)], history.undo());
        assert!(history.is_at_start());
    }
}
