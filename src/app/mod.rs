//! Application configuration.
//!
//! Agent settings are read from a JSON file when one is given and then
//! overridden by command-line flags.

pub mod config;

pub use config::AgentConfig;
