//! Repository port for agent persistence.
//!
//! This module defines the trait boundary between the domain and the storage
//! formats used to keep a trained agent between runs.

use std::path::Path;

use crate::{Result, menace::SavedMenaceAgent};

/// Port for persisting and loading trained MENACE agents.
///
/// # Examples
///
/// ```no_run
/// use menace::adapters::JsonRepository;
/// use menace::menace::{MenaceAgent, SavedMenaceAgent, TrainingMetadata};
/// use menace::ports::AgentRepository;
/// use std::path::Path;
///
/// let agent = MenaceAgent::new(Some(7))?;
/// let saved = SavedMenaceAgent::from_agent(&agent, TrainingMetadata::default());
/// JsonRepository.save(&saved, Path::new("agent.json"))?;
/// let restored = JsonRepository.load(Path::new("agent.json"))?.to_agent(None)?;
/// # Ok::<(), menace::Error>(())
/// ```
pub trait AgentRepository {
    /// Save an agent to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails.
    fn save(&self, agent: &SavedMenaceAgent, path: &Path) -> Result<()>;

    /// Load an agent from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are not a
    /// valid saved agent (including malformed state keys).
    fn load(&self, path: &Path) -> Result<SavedMenaceAgent>;
}
