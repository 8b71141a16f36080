//! Per-game record of the decisions MENACE made

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// One decision: the canonical state and the bead (canonical cell) drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub key: StateKey,
    pub position: usize,
}

/// Ordered decisions of the learning side during a single game.
///
/// The game driver creates one per game and hands it to reinforcement,
/// which drains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameTrace {
    steps: Vec<TraceStep>,
}

impl GameTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: StateKey, position: usize) {
        self.steps.push(TraceStep { key, position });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter()
    }

    /// Remove and yield every step, leaving the trace empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, TraceStep> {
        self.steps.drain(..)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
