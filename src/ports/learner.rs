//! Learner port - the side of the game that learns from outcomes

use crate::{
    Result,
    menace::{GameTrace, Outcome},
    tictactoe::Board,
};

/// Interface the game driver uses to play and train the learning side.
///
/// The driver owns one [`GameTrace`] per game and passes it to both calls,
/// so decisions from one game can never be credited to another.
///
/// # Examples
///
/// ```no_run
/// use menace::{
///     menace::{GameTrace, Outcome},
///     ports::Learner,
///     tictactoe::Board,
/// };
///
/// fn one_move<L: Learner>(learner: &mut L) -> menace::Result<()> {
///     let mut trace = GameTrace::new();
///     let _position = learner.select_move(&Board::new(), &mut trace)?;
///     learner.reinforce(&mut trace, Outcome::Draw)
/// }
/// ```
pub trait Learner: Send {
    /// Choose a cell for `board`, recording the decision in `trace`.
    ///
    /// Returns `Ok(None)` when the board has no empty cell.
    fn select_move(&mut self, board: &Board, trace: &mut GameTrace) -> Result<Option<usize>>;

    /// Learn from a finished game. Implementations must leave `trace` empty.
    fn reinforce(&mut self, trace: &mut GameTrace, outcome: Outcome) -> Result<()>;

    /// Name used in logs and summaries.
    fn name(&self) -> &str;
}
