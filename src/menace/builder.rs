//! Builder pattern for MenaceAgent construction
//!
//! Provides a fluent API for configuring and creating MENACE agents.

use super::{
    agent::{MenaceAgent, rng_from_seed},
    classic::ReinforcementValues,
    state_table::StateTable,
};
use crate::app::{AgentConfig, config::DEFAULT_INITIAL_BEADS};

/// Builder for constructing MenaceAgent instances with custom configuration.
///
/// # Examples
///
/// ```
/// use menace::menace::MenaceAgentBuilder;
///
/// // Defaults: four beads per cell, rewards 3/1/-1
/// let agent = MenaceAgentBuilder::new().build()?;
///
/// // Harsher schedule from a fixed seed
/// let agent = MenaceAgentBuilder::new()
///     .seed(42)
///     .initial_beads(2)
///     .loss_reinforcement(-2)
///     .build()?;
/// # Ok::<(), menace::Error>(())
/// ```
#[derive(Debug)]
pub struct MenaceAgentBuilder {
    seed: Option<u64>,
    initial_beads: u32,
    reinforcement: ReinforcementValues,
    table: Option<StateTable>,
    games_trained: usize,
}

impl MenaceAgentBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded or assembled configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.seed = config.seed;
        self.initial_beads = config.initial_beads;
        self.reinforcement = config.reinforcement;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Beads placed in each slot of a new matchbox.
    pub fn initial_beads(mut self, beads: u32) -> Self {
        self.initial_beads = beads;
        self
    }

    /// Set the reinforcement values for training.
    pub fn reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.reinforcement = values;
        self
    }

    pub fn win_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.win = value;
        self
    }

    pub fn draw_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.draw = value;
        self
    }

    pub fn loss_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.loss = value;
        self
    }

    /// Use an existing table instead of creating a new one.
    ///
    /// This is used when restoring a trained agent. The table keeps its own
    /// initial bead count, overriding [`MenaceAgentBuilder::initial_beads`].
    pub fn with_table(mut self, table: StateTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Carry over the training counter of a restored agent.
    pub fn games_trained(mut self, games: usize) -> Self {
        self.games_trained = games;
        self
    }

    /// Build the agent.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfiguration`] when no table was
    /// supplied and the initial bead count is zero.
    pub fn build(self) -> crate::Result<MenaceAgent> {
        let table = match self.table {
            Some(table) => table,
            None => StateTable::new(self.initial_beads)?,
        };

        Ok(MenaceAgent {
            table,
            rng: rng_from_seed(self.seed),
            reinforcement: self.reinforcement,
            games_trained: self.games_trained,
        })
    }
}

impl Default for MenaceAgentBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            initial_beads: DEFAULT_INITIAL_BEADS,
            reinforcement: ReinforcementValues::default(),
            table: None,
            games_trained: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateKey;

    #[test]
    fn test_builder_defaults() {
        let agent = MenaceAgentBuilder::new().build().unwrap();
        assert_eq!(agent.table().initial_beads(), 4);
        assert_eq!(agent.reinforcement_values(), ReinforcementValues::default());
        assert_eq!(agent.games_trained(), 0);
    }

    #[test]
    fn test_builder_individual_rewards() {
        let agent = MenaceAgentBuilder::new()
            .win_reinforcement(5)
            .draw_reinforcement(0)
            .loss_reinforcement(-3)
            .build()
            .unwrap();
        let values = agent.reinforcement_values();
        assert_eq!((values.win, values.draw, values.loss), (5, 0, -3));
    }

    #[test]
    fn test_builder_from_config() {
        let config = AgentConfig::default().with_initial_beads(9).with_seed(3);
        let agent = MenaceAgentBuilder::new().config(config).build().unwrap();
        assert_eq!(agent.table().initial_beads(), 9);
    }

    #[test]
    fn test_builder_rejects_zero_beads() {
        assert!(MenaceAgentBuilder::new().initial_beads(0).build().is_err());
    }

    #[test]
    fn test_builder_with_table_keeps_contents() {
        let mut table = StateTable::new(2).unwrap();
        let key = StateKey::parse("000000000").unwrap();
        table.get_or_insert(&key).set_bead_count(4, 11);

        let agent = MenaceAgentBuilder::new()
            .initial_beads(7)
            .with_table(table)
            .build()
            .unwrap();
        assert_eq!(agent.table().initial_beads(), 2);
        assert_eq!(agent.table().get(&key).unwrap().bead_count(4), 11);
    }
}
