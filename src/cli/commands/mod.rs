//! Subcommands of the `menace` binary

pub mod evaluate;
pub mod inspect;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    adapters::repository_for,
    menace::{MenaceAgent, SavedMenaceAgent},
    ports::AgentRepository,
};

/// Read a saved agent, choosing the format from the file extension.
pub(crate) fn load_saved(path: &Path) -> Result<SavedMenaceAgent> {
    repository_for(path)
        .load(path)
        .with_context(|| format!("Failed to load agent from {}", path.display()))
}

/// Read a saved agent and restore it with a fresh RNG.
pub(crate) fn load_agent(path: &Path, seed: Option<u64>) -> Result<(SavedMenaceAgent, MenaceAgent)> {
    let saved = load_saved(path)?;
    let agent = saved
        .to_agent(seed)
        .with_context(|| format!("Agent in {} cannot be restored", path.display()))?;
    Ok((saved, agent))
}
