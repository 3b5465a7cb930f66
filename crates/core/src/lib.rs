//! Taskfolio Core - task variants, collections, and display-state derivation.
//!
//! This crate turns untyped task records into typed task variants and derives
//! the read-only display state shown for them. It performs no I/O: storage
//! and transport are reached through the repository traits, which are
//! implemented by the external collaborator.

pub mod collections;
pub mod constants;
pub mod errors;
pub mod events;
pub mod settings;
pub mod tasks;
pub mod utils;

// Re-export the task model, the heart of the crate
pub use tasks::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
