//! Game driver and training pipeline for learnable agents

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    menace::{GameTrace, Outcome},
    ports::{Learner, Observer, Opponent},
    tictactoe::{Game, Player},
};

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Whether the agent plays as X or O
    pub agent_player: Player,

    /// Games per entry in [`TrainingResult::history`]; zero disables it
    pub report_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 500,
            agent_player: Player::X,
            report_every: 100,
        }
    }
}

/// Outcome counts for one reporting interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSummary {
    /// Cumulative game count at the end of the interval
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

/// Result of a training or evaluation run, from the agent's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Per-interval counts, oldest first
    pub history: Vec<IntervalSummary>,
}

impl TrainingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        self.total_games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }
}

/// Running totals of a training run plus the interval history.
pub(crate) struct RunTally {
    result: TrainingResult,
    interval: TrainingResult,
    report_every: usize,
}

impl RunTally {
    pub(crate) fn new(report_every: usize) -> Self {
        Self {
            result: TrainingResult::new(),
            interval: TrainingResult::new(),
            report_every,
        }
    }

    /// Count one game, closing the current interval when it is full.
    pub(crate) fn record(&mut self, outcome: Outcome) -> &TrainingResult {
        self.result.record(outcome);
        self.interval.record(outcome);

        let every = self.report_every;
        if every > 0 && self.result.total_games.is_multiple_of(every) {
            self.result.history.push(IntervalSummary {
                games: self.result.total_games,
                wins: self.interval.wins,
                draws: self.interval.draws,
                losses: self.interval.losses,
            });
            self.interval = TrainingResult::new();
        }
        &self.result
    }

    pub(crate) fn finish(self) -> TrainingResult {
        self.result
    }
}

/// Play one game and reinforce the learner with its outcome.
///
/// X always opens; the learner plays `agent_player`. A side with nothing to
/// play ends the game as a draw. The learner is reinforced exactly once per
/// completed game.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidMove`] if either side picks an occupied
/// or out-of-range cell. The game's decisions are discarded unlearned.
pub fn play_game<L, O>(learner: &mut L, opponent: &mut O, agent_player: Player) -> Result<Outcome>
where
    L: Learner + ?Sized,
    O: Opponent + ?Sized,
{
    let mut trace = GameTrace::new();
    let outcome = play_out(learner, opponent, agent_player, &mut trace)?;
    learner.reinforce(&mut trace, outcome)?;
    Ok(outcome)
}

/// Play `games` games without reinforcement and count the results.
///
/// No rewards or penalties are applied. Selection itself still runs, so the
/// learner opens matchboxes for unseen states and refills a state whose
/// legal moves hold no beads when it draws from it.
pub fn evaluate<L, O>(
    learner: &mut L,
    opponent: &mut O,
    games: usize,
    agent_player: Player,
) -> Result<TrainingResult>
where
    L: Learner + ?Sized,
    O: Opponent + ?Sized,
{
    let mut result = TrainingResult::new();
    let mut trace = GameTrace::new();
    for _ in 0..games {
        let outcome = play_out(learner, opponent, agent_player, &mut trace)?;
        trace.clear();
        result.record(outcome);
    }
    Ok(result)
}

fn play_out<L, O>(
    learner: &mut L,
    opponent: &mut O,
    agent_player: Player,
    trace: &mut GameTrace,
) -> Result<Outcome>
where
    L: Learner + ?Sized,
    O: Opponent + ?Sized,
{
    let mut game = Game::new();
    loop {
        let board = *game.board();
        let choice = if game.to_move() == agent_player {
            learner.select_move(&board, trace)?
        } else {
            let choice = opponent.select_move(&board);
            if choice.is_none() {
                log::warn!(
                    "opponent '{}' had no move with {} empty cells; scoring a draw",
                    opponent.name(),
                    board.empty_positions().len()
                );
            }
            choice
        };

        let Some(position) = choice else {
            let outcome = game.concede_draw();
            return Ok(Outcome::for_player(outcome, agent_player));
        };

        if let Some(outcome) = game.play(position)? {
            return Ok(Outcome::for_player(outcome, agent_player));
        }
    }
}

/// Training pipeline for a single learner against an opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and opponent
    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Opponent,
    ) -> Result<TrainingResult> {
        let mut tally = RunTally::new(self.config.report_every);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        for _ in 0..self.config.num_games {
            let outcome = play_game(&mut *agent, &mut *opponent, self.config.agent_player)?;
            let totals = tally.record(outcome);
            for observer in &mut self.observers {
                observer.on_game_end(totals.total_games, outcome, totals)?;
            }
        }

        let result = tally.finish();
        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        menace::MenaceAgent,
        pipeline::RandomOpponent,
        tictactoe::Board,
    };

    /// Learner that plays the first empty cell and remembers what it was told.
    #[derive(Default)]
    struct FirstFree {
        reinforced: Vec<(usize, Outcome)>,
    }

    impl Learner for FirstFree {
        fn select_move(&mut self, board: &Board, trace: &mut GameTrace) -> Result<Option<usize>> {
            let choice = board.empty_positions().first().copied();
            if let Some(pos) = choice {
                trace.record(board.canonical_key(), pos);
            }
            Ok(choice)
        }

        fn reinforce(&mut self, trace: &mut GameTrace, outcome: Outcome) -> Result<()> {
            self.reinforced.push((trace.len(), outcome));
            trace.clear();
            Ok(())
        }

        fn name(&self) -> &str {
            "first-free"
        }
    }

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            num_games: 10,
            agent_player: Player::X,
            report_every: 5,
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = MenaceAgent::new(Some(42)).unwrap();
        let mut opponent = RandomOpponent::new(Some(43));

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.wins + result.draws + result.losses, 10);
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.history[1].games, 10);
        assert_eq!(agent.games_trained(), 10);
    }

    #[test]
    fn opponent_giving_up_is_a_reinforced_draw() {
        let mut learner = FirstFree::default();
        let mut quitter = |_: &Board| -> Option<usize> { None };

        let outcome = play_game(&mut learner, &mut quitter, Player::X).unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(learner.reinforced, vec![(1, Outcome::Draw)]);
    }

    #[test]
    fn win_on_top_row_is_scored_for_agent() {
        // Agent X takes 0, 1, 2; the opponent answers in the bottom row.
        let mut learner = FirstFree::default();
        let mut opponent = |board: &Board| board.empty_positions().last().copied();

        let outcome = play_game(&mut learner, &mut opponent, Player::X).unwrap();
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(learner.reinforced, vec![(3, Outcome::Win)]);
    }

    #[test]
    fn illegal_opponent_move_aborts_without_learning() {
        let mut learner = FirstFree::default();
        let mut cheat = |_: &Board| -> Option<usize> { Some(0) };

        let result = play_game(&mut learner, &mut cheat, Player::X);
        assert!(matches!(
            result,
            Err(crate::Error::InvalidMove { position: 0 })
        ));
        assert!(learner.reinforced.is_empty());
    }

    #[test]
    fn evaluate_never_reinforces() {
        let mut agent = MenaceAgent::new(Some(5)).unwrap();
        let mut opponent = RandomOpponent::new(Some(6));

        let result = evaluate(&mut agent, &mut opponent, 20, Player::O).unwrap();
        assert_eq!(result.total_games, 20);
        assert_eq!(agent.games_trained(), 0);
        assert_eq!(agent.table().min_bead_count(), Some(4));
        assert!(agent.table().iter().all(|(_, m)| m.beads().iter().all(|&b| b == 4)));
    }

    #[test]
    fn evaluate_refills_a_drained_state_but_applies_no_rewards() {
        let mut agent = MenaceAgent::new(Some(8)).unwrap();
        let opening = Board::new().canonical_key();
        for pos in 0..9 {
            agent.table_mut().get_or_insert(&opening).set_bead_count(pos, 0);
        }
        let mut opponent = RandomOpponent::new(Some(9));

        evaluate(&mut agent, &mut opponent, 1, Player::X).unwrap();

        assert_eq!(agent.table().get(&opening).unwrap().beads(), &[4; 9]);
        assert!(agent.table().iter().all(|(_, m)| m.beads().iter().all(|&b| b == 4)));
        assert_eq!(agent.games_trained(), 0);
    }

    #[test]
    fn history_closes_an_interval_every_report_period() {
        let mut tally = RunTally::new(2);
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Draw, Outcome::Win, Outcome::Win] {
            tally.record(outcome);
        }
        let result = tally.finish();

        assert_eq!(result.total_games, 5);
        assert_eq!(
            result.history,
            vec![
                IntervalSummary { games: 2, wins: 1, draws: 0, losses: 1 },
                IntervalSummary { games: 4, wins: 1, draws: 1, losses: 0 },
            ]
        );
    }

    #[test]
    fn observers_see_every_game() {
        struct Counter(Arc<Mutex<Vec<usize>>>);

        impl Observer for Counter {
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
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_games: 3,
            ..TrainingConfig::default()
        })
        .with_observer(Box::new(Counter(Arc::clone(&seen))));

        let mut agent = MenaceAgent::new(Some(1)).unwrap();
        let mut opponent = RandomOpponent::new(Some(2));
        pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }
}
