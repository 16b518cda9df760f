//! vidrec-cli: loaders and command implementations for the `vidrec` binary.
//!
//! Scoring and evaluation live in `vidrec-core`; this crate reads the CSV
//! inputs and wires them into a scoring session.

/// Command implementations shared by `main.rs` and the integration tests.
pub mod commands;
/// CSV loaders for interactions and item features.
pub mod dataset;
