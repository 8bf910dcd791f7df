//! wks-runtime
//!
//! Orchestrates one reconciliation run: parse -> inventory -> plan ->
//! (dry-run exit | expand -> re-inventory -> re-plan) -> write -> clear ->
//! confirm. Every failure converts into a [`RunOutcome`] at this boundary;
//! nothing propagates past it.

pub mod engine;
pub mod error;
pub mod options;
pub mod outcome;

pub use engine::ImportEngine;
pub use error::RunError;
pub use options::RunOptions;
pub use outcome::RunOutcome;
