//! MENACE: matchbox learning for tic-tac-toe

pub mod agent;
pub mod builder;
pub mod classic;
pub mod matchbox;
pub mod selection;
pub mod serialization;
pub mod state_table;
pub mod trace;

pub use agent::{AgentStats, MenaceAgent};
pub use builder::MenaceAgentBuilder;
pub use classic::{Outcome, ReinforcementValues};
pub use matchbox::Matchbox;
pub use serialization::{SavedMenaceAgent, TrainingMetadata};
pub use state_table::{StateTable, TableStats};
pub use trace::{GameTrace, TraceStep};
