//! Command-line interface for training and inspecting MENACE agents

pub mod commands;
pub mod output;
