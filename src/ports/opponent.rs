//! Opponent port - the policy MENACE plays against

use crate::tictactoe::Board;

/// A move policy for the non-learning side.
///
/// Implementations must return an empty cell of `board`, or `None` when they
/// have nothing to play. Any `FnMut(&Board) -> Option<usize>` closure is an
/// opponent.
///
/// # Examples
///
/// ```
/// use menace::{ports::Opponent, tictactoe::Board};
///
/// let mut first_free = |board: &Board| board.empty_positions().first().copied();
/// assert_eq!(first_free.select_move(&Board::new()), Some(0));
/// ```
pub trait Opponent: Send {
    fn select_move(&mut self, board: &Board) -> Option<usize>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Opponent for F
where
    F: FnMut(&Board) -> Option<usize> + Send,
{
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        self(board)
    }
}
