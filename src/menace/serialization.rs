//! Agent serialization support
//!
//! Provides the saved form of a trained MENACE agent. Storage formats live in
//! [`crate::adapters`].

use serde::{Deserialize, Serialize};

use super::{agent::MenaceAgent, state_table::StateTable};
use crate::{Error, Result, app::AgentConfig, tictactoe::Player};

/// Serializable representation of a trained MENACE agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMenaceAgent {
    /// Version of the save format (for future compatibility)
    pub version: u32,
    /// Settings the agent was created with
    pub config: AgentConfig,
    /// Training metadata
    pub metadata: TrainingMetadata,
    /// The learned matchboxes, keyed by canonical state
    pub table: StateTable,
}

/// Metadata about the training process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingMetadata {
    /// Number of games trained
    pub games_trained: usize,
    /// Opponent(s) trained against
    pub opponents: Vec<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Which token the agent was trained to control
    pub agent_player: Option<Player>,
}

impl SavedMenaceAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    /// Create from a trained agent.
    ///
    /// The game counter in `metadata` is replaced by the agent's own.
    pub fn from_agent(agent: &MenaceAgent, metadata: TrainingMetadata) -> Self {
        let config = AgentConfig {
            initial_beads: agent.table().initial_beads(),
            reinforcement: agent.reinforcement_values(),
            seed: metadata.seed,
        };
        let metadata = TrainingMetadata {
            games_trained: agent.games_trained(),
            ..metadata
        };

        SavedMenaceAgent {
            version: Self::VERSION,
            config,
            metadata,
            table: agent.table().clone(),
        }
    }

    /// Restore a playable agent.
    ///
    /// `seed` seeds the restored agent's RNG; the seed used for training is
    /// not reused, so a resumed run does not replay its first draws.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] for an unknown format version
    /// or a zero initial bead count.
    pub fn to_agent(&self, seed: Option<u64>) -> Result<MenaceAgent> {
        if self.version > Self::VERSION {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "saved agent has format version {}, newest supported is {}",
                    self.version,
                    Self::VERSION
                ),
            });
        }
        self.config.validate()?;
        if self.table.initial_beads() == 0 {
            return Err(Error::InvalidConfiguration {
                message: "saved table has zero initial beads".to_string(),
            });
        }

        let mut builder = MenaceAgent::builder()
            .reinforcement(self.config.reinforcement)
            .with_table(self.table.clone())
            .games_trained(self.metadata.games_trained);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}
