//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::TrainingResult;
use crate::{Error, Result, menace::Outcome, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

fn tally(totals: &TrainingResult) -> String {
    format!("{} D:{} L:{}", totals.wins, totals.draws, totals.losses)
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        _outcome: Outcome,
        totals: &TrainingResult,
    ) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            pb.set_message(tally(totals));
        }
        Ok(())
    }

    fn on_training_end(&mut self, totals: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(tally(totals));
        }
        Ok(())
    }
}

/// Logs cumulative wins, losses and draws every `every` games.
pub struct ReportObserver {
    every: usize,
}

impl ReportObserver {
    /// `every` of zero only reports the final totals.
    pub fn new(every: usize) -> Self {
        Self { every }
    }
}

impl Default for ReportObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Observer for ReportObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        log::info!("training for {total_games} games");
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        _outcome: Outcome,
        totals: &TrainingResult,
    ) -> Result<()> {
        if self.every > 0 && game_num.is_multiple_of(self.every) {
            log::info!(
                "game {game_num}: wins={} losses={} draws={}",
                totals.wins,
                totals.losses,
                totals.draws
            );
        }
        Ok(())
    }

    fn on_training_end(&mut self, totals: &TrainingResult) -> Result<()> {
        log::info!(
            "finished {} games: win rate {:.1}%, draw rate {:.1}%, loss rate {:.1}%",
            totals.total_games,
            totals.win_rate() * 100.0,
            totals.draw_rate() * 100.0,
            totals.loss_rate() * 100.0
        );
        Ok(())
    }
}

/// One line of a [`JsonlObserver`] log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_num: usize,
    pub outcome: Outcome,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

/// JSONL observer - writes one record per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create game log {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: Outcome,
        totals: &TrainingResult,
    ) -> Result<()> {
        let record = GameRecord {
            game_num,
            outcome,
            wins: totals.wins,
            draws: totals.draws,
            losses: totals.losses,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self, _totals: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
