//! Configuration types for agent creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, menace::ReinforcementValues};

/// Bead count for a freshly opened matchbox.
pub const DEFAULT_INITIAL_BEADS: u32 = 4;

/// Configuration for creating a MENACE agent.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use menace::app::AgentConfig;
/// use menace::menace::ReinforcementValues;
///
/// let config = AgentConfig::default()
///     .with_seed(42)
///     .with_initial_beads(6)
///     .with_reinforcement(ReinforcementValues { win: 2, draw: 0, loss: -2 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Beads per cell in a new matchbox, and the refill level for a drained one
    pub initial_beads: u32,
    /// Bead adjustments for a win, draw and loss
    pub reinforcement: ReinforcementValues,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON for this
    /// type, or fails [`AgentConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config: AgentConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings under which MENACE could stop being able to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when `initial_beads` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.initial_beads == 0 {
            return Err(Error::InvalidConfiguration {
                message: "initial_beads must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_initial_beads(mut self, beads: u32) -> Self {
        self.initial_beads = beads;
        self
    }

    pub fn with_reinforcement(mut self, reinforcement: ReinforcementValues) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_beads: DEFAULT_INITIAL_BEADS,
            reinforcement: ReinforcementValues::default(),
            seed: None,
        }
    }
}
