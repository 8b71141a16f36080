//! JSON implementation of the agent repository.
//!
//! The state table is written as an object from canonical key to its nine
//! bead counts, which keeps saved agents readable and diffable.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, menace::SavedMenaceAgent, ports::AgentRepository};

/// Pretty-printed JSON agent repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl AgentRepository for JsonRepository {
    fn save(&self, agent: &SavedMenaceAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, agent)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {path:?}"),
            source,
        })?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedMenaceAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let agent = serde_json::from_reader(BufReader::new(file))?;
        Ok(agent)
    }
}
