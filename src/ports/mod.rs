//! Ports (trait boundaries) for external collaborators.
//!
//! The learner, the opposing policy, training observers and persistence are
//! all reached through these traits so the game driver never depends on a
//! concrete implementation.

pub mod learner;
pub mod observer;
pub mod opponent;
pub mod repository;

pub use learner::Learner;
pub use observer::Observer;
pub use opponent::Opponent;
pub use repository::AgentRepository;
