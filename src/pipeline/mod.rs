//! Training and evaluation pipeline
//!
//! This module provides:
//! - The game driver that pits a learner against an opponent
//! - Sequential and parallel training runs
//! - Evaluation without learning
//! - Observers for progress and logging

pub mod observers;
pub mod opponents;
pub mod parallel;
pub mod training;

pub use observers::{GameRecord, JsonlObserver, ProgressObserver, ReportObserver};
pub use opponents::{OpponentKind, OptimalOpponent, RandomOpponent};
pub use parallel::{ParallelConfig, SharedMenaceLearner, SharedStateTable, train_parallel};
pub use training::{
    IntervalSummary, TrainingConfig, TrainingPipeline, TrainingResult, evaluate, play_game,
};

pub use crate::ports::{Learner, Observer, Opponent};
