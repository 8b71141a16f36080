//! Observer port - abstraction for watching a training run
//!
//! Progress reporting and logging hook into the pipeline through this trait
//! instead of being wired into the game loop.

use crate::{Result, menace::Outcome, pipeline::TrainingResult};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once at the beginning
/// 2. `on_game_end(game_num, outcome, totals)` - after every game, once the
///    learner has been reinforced
/// 3. `on_training_end(totals)` - once at the end
///
/// # Examples
///
/// ```no_run
/// use menace::{menace::Outcome, pipeline::TrainingResult, ports::Observer};
///
/// struct LossCounter {
///     losses: usize,
/// }
///
/// impl Observer for LossCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: Outcome,
///         _totals: &TrainingResult,
///     ) -> menace::Result<()> {
///         if outcome == Outcome::Loss {
///             self.losses += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game with its outcome and the running totals.
    ///
    /// `game_num` is 1-based: it equals `totals.total_games`.
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _outcome: Outcome,
        _totals: &TrainingResult,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_training_end(&mut self, _totals: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
