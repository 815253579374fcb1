use std::ops::Deref;

use crate::{Board, Card};

/// Temporary cell writes on a board, undone when the guard goes away.
///
/// Writes are undone in reverse order, either explicitly with [`Self::pop()`]
/// or all at once on drop, so the board is restored on every exit path.
/// Only cell contents are touched: bounds and the play history never change
/// while speculating. The guard only gives shared access to the board, so
/// nothing but [`Self::push()`] can write to it until the guard is dropped:
///
/// ```compile_fail
/// use punto::{card, Board};
///
/// let mut board = Board::new(card!("A5"));
/// let mut speculation = board.speculate();
/// speculation.play(card!("B6"), 6, 5).unwrap();
/// ```
pub struct Speculation<'a> {
    board: &'a mut Board,
    undo: Vec<(i8, i8, Option<Card>)>,
}

impl<'a> Speculation<'a> {
    pub(crate) fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            undo: Vec::new(),
        }
    }

    /// Writes `card` to `(x, y)` and returns the previous occupant.
    ///
    /// Panics if the position is not on the grid.
    pub fn push(&mut self, card: Card, x: i8, y: i8) -> Option<Card> {
        let previous = self.board.set(Some(card), x, y);
        self.undo.push((x, y, previous));
        previous
    }

    /// Reverts the most recent write. Returns `false` if there was nothing to revert.
    pub fn pop(&mut self) -> bool {
        match self.undo.pop() {
            Some((x, y, previous)) => {
                self.board.set(previous, x, y);
                true
            }
            None => false,
        }
    }

    /// Number of writes not reverted yet.
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// A guard for writes on top of the current ones. Its writes are undone
    /// when it is dropped, while the writes of `self` stay in place.
    pub fn nested(&mut self) -> Speculation<'_> {
        Speculation::new(self.board)
    }
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        while self.pop() {}
    }
}
