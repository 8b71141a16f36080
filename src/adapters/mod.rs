//! Adapters implementing domain ports.
//!
//! Storage formats for trained agents live here; the domain only sees the
//! [`AgentRepository`] trait.

pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::ports::AgentRepository;

/// Pick a repository from the file extension: `.msgpack`/`.mp` use
/// MessagePack, anything else JSON.
pub fn repository_for(path: &Path) -> Box<dyn AgentRepository> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("msgpack") || ext.eq_ignore_ascii_case("mp") => {
            Box::new(MsgPackRepository)
        }
        _ => Box::new(JsonRepository),
    }
}
