//! MessagePack implementation of the agent repository.
//!
//! Compact binary storage via rmp_serde.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, menace::SavedMenaceAgent, ports::AgentRepository};

/// MessagePack-based agent repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedMenaceAgent, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write_named(&mut file, agent).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedMenaceAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
