//! MENACE (Matchbox Educable Noughts And Crosses Engine) implementation
//!
//! This crate provides:
//! - Tic-Tac-Toe board, rules and the eight board symmetries
//! - MENACE learning agent with matchbox-based reinforcement learning
//! - A game driver, fixed opponents and sequential or parallel training
//! - JSON and MessagePack persistence for trained agents
//!
//! # Example
//!
//! ```
//! use menace::{
//!     menace::MenaceAgent,
//!     pipeline::{RandomOpponent, TrainingConfig, TrainingPipeline},
//! };
//!
//! let mut agent = MenaceAgent::new(Some(42))?;
//! let mut opponent = RandomOpponent::new(Some(7));
//! let result = TrainingPipeline::new(TrainingConfig {
//!     num_games: 50,
//!     ..TrainingConfig::default()
//! })
//! .run(&mut agent, &mut opponent)?;
//! assert_eq!(result.total_games, 50);
//! # Ok::<(), menace::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod menace;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use types::StateKey;
