//! Training many games at once against one shared state table
//!
//! The table is the only shared state. It sits behind a single mutex; each
//! worker owns its RNG, its opponent and the trace of the game it is playing.

use std::sync::{Arc, Mutex, MutexGuard};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use super::training::{RunTally, TrainingConfig, TrainingResult, play_game};
use crate::{
    Error, Result,
    menace::{GameTrace, Outcome, ReinforcementValues, StateTable},
    ports::{Learner, Observer, Opponent},
    tictactoe::Board,
};

/// Cloneable handle to a state table shared between threads.
#[derive(Debug, Clone)]
pub struct SharedStateTable {
    inner: Arc<Mutex<StateTable>>,
}

impl SharedStateTable {
    pub fn new(table: StateTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Lock the table for reading or writing.
    pub fn lock(&self) -> Result<MutexGuard<'_, StateTable>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Take the table back once every other handle is gone.
    pub fn into_inner(self) -> Result<StateTable> {
        let mutex = Arc::try_unwrap(self.inner).map_err(|_| Error::InvalidConfiguration {
            message: "shared state table is still referenced by a worker".to_string(),
        })?;
        mutex.into_inner().map_err(|_| Error::LockPoisoned)
    }
}

/// MENACE learner drawing from a [`SharedStateTable`] with its own RNG.
pub struct SharedMenaceLearner {
    table: SharedStateTable,
    rng: StdRng,
    reinforcement: ReinforcementValues,
    name: String,
}

impl SharedMenaceLearner {
    pub fn new(
        table: SharedStateTable,
        rng: StdRng,
        reinforcement: ReinforcementValues,
        name: String,
    ) -> Self {
        Self {
            table,
            rng,
            reinforcement,
            name,
        }
    }
}

impl Learner for SharedMenaceLearner {
    fn select_move(&mut self, board: &Board, trace: &mut GameTrace) -> Result<Option<usize>> {
        let mut table = self.table.lock()?;
        Ok(table.select_move(board, &mut self.rng, trace))
    }

    fn reinforce(&mut self, trace: &mut GameTrace, outcome: Outcome) -> Result<()> {
        let mut table = self.table.lock()?;
        table.reinforce(trace, outcome, &self.reinforcement);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Settings for [`train_parallel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Total games, agent side and history interval for the whole run
    pub training: TrainingConfig,
    /// Number of workers; games are split as evenly as possible
    pub workers: usize,
    /// Base seed; worker `i` derives its randomness from `seed + i`
    pub seed: Option<u64>,
}

/// Totals and observers shared by every worker of a run.
struct SharedProgress {
    tally: RunTally,
    observers: Vec<Box<dyn Observer>>,
}

impl SharedProgress {
    fn game_end(&mut self, outcome: Outcome) -> Result<()> {
        let totals = self.tally.record(outcome);
        for observer in &mut self.observers {
            observer.on_game_end(totals.total_games, outcome, totals)?;
        }
        Ok(())
    }
}

/// Train `table` with `config.workers` concurrent workers.
///
/// `make_opponent` receives the worker index and a seed derived from that
/// worker's RNG. Finished games are counted in completion order across all
/// workers: `observers` see one `on_game_end` per game and the interval
/// history follows `config.training.report_every`. Game interleaving depends
/// on scheduling, so the final table is not reproducible even with a fixed
/// seed; each worker's own random stream is.
///
/// # Errors
///
/// Returns the first worker or observer error, or [`Error::LockPoisoned`]
/// if a worker panicked while holding a lock.
pub fn train_parallel<F>(
    table: StateTable,
    reinforcement: ReinforcementValues,
    config: &ParallelConfig,
    mut observers: Vec<Box<dyn Observer>>,
    make_opponent: F,
) -> Result<(StateTable, TrainingResult)>
where
    F: Fn(usize, u64) -> Box<dyn Opponent> + Sync,
{
    let workers = config.workers.max(1);
    let total = config.training.num_games;
    let shared = SharedStateTable::new(table);

    log::info!("training {total} games on {workers} workers");
    for observer in &mut observers {
        observer.on_training_start(total)?;
    }
    let progress = Mutex::new(SharedProgress {
        tally: RunTally::new(config.training.report_every),
        observers,
    });

    (0..workers)
        .into_par_iter()
        .try_for_each(|index| -> Result<()> {
            let games = total / workers + usize::from(index < total % workers);
            let mut worker_rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                None => StdRng::from_os_rng(),
            };
            let mut opponent = make_opponent(index, worker_rng.random());
            let mut learner = SharedMenaceLearner::new(
                shared.clone(),
                StdRng::from_rng(&mut worker_rng),
                reinforcement,
                format!("menace-{index}"),
            );

            let mut own = TrainingResult::new();
            for _ in 0..games {
                let outcome =
                    play_game(&mut learner, opponent.as_mut(), config.training.agent_player)?;
                own.record(outcome);
                progress
                    .lock()
                    .map_err(|_| Error::LockPoisoned)?
                    .game_end(outcome)?;
            }
            log::debug!(
                "worker {index} finished {} games ({} wins, {} draws, {} losses)",
                own.total_games,
                own.wins,
                own.draws,
                own.losses
            );
            Ok(())
        })?;

    let SharedProgress {
        tally,
        mut observers,
    } = progress.into_inner().map_err(|_| Error::LockPoisoned)?;
    let result = tally.finish();
    for observer in &mut observers {
        observer.on_training_end(&result)?;
    }
    Ok((shared.into_inner()?, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::RandomOpponent, tictactoe::Player};

    fn config(games: usize, workers: usize) -> ParallelConfig {
        ParallelConfig {
            training: TrainingConfig {
                num_games: games,
                agent_player: Player::X,
                report_every: 10,
            },
            workers,
            seed: Some(7),
        }
    }

    #[test]
    fn all_games_are_counted_across_workers() {
        let table = StateTable::new(4).unwrap();
        let (table, result) = train_parallel(
            table,
            ReinforcementValues::default(),
            &config(103, 4),
            Vec::new(),
            |_, seed| Box::new(RandomOpponent::new(Some(seed))),
        )
        .unwrap();

        assert_eq!(result.total_games, 103);
        assert_eq!(result.wins + result.draws + result.losses, 103);
        assert!(!table.is_empty());

        assert_eq!(result.history.len(), 10);
        for (i, interval) in result.history.iter().enumerate() {
            assert_eq!(interval.games, (i + 1) * 10);
            assert_eq!(interval.wins + interval.draws + interval.losses, 10);
        }
    }

    #[test]
    fn observers_see_every_game_once_in_order() {
        struct Seen(Arc<Mutex<Vec<usize>>>, Arc<Mutex<Option<usize>>>);

        impl Observer for Seen {
            fn on_game_end(
                &mut self,
                game_num: usize,
                _outcome: Outcome,
                totals: &TrainingResult,
            ) -> Result<()> {
                assert_eq!(game_num, totals.total_games);
                self.0.lock().unwrap().push(game_num);
                Ok(())
            }

            fn on_training_end(&mut self, totals: &TrainingResult) -> Result<()> {
                *self.1.lock().unwrap() = Some(totals.total_games);
                Ok(())
            }
        }

        let games = Arc::new(Mutex::new(Vec::new()));
        let finished = Arc::new(Mutex::new(None));
        train_parallel(
            StateTable::new(4).unwrap(),
            ReinforcementValues::default(),
            &config(50, 3),
            vec![Box::new(Seen(Arc::clone(&games), Arc::clone(&finished)))],
            |_, seed| Box::new(RandomOpponent::new(Some(seed))),
        )
        .unwrap();

        assert_eq!(*games.lock().unwrap(), (1..=50).collect::<Vec<_>>());
        assert_eq!(*finished.lock().unwrap(), Some(50));
    }

    #[test]
    fn shared_handle_blocks_unwrap() {
        let shared = SharedStateTable::new(StateTable::new(4).unwrap());
        let other = shared.clone();
        assert!(shared.into_inner().is_err());
        assert!(other.into_inner().is_ok());
    }
}
