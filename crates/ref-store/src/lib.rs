//! # ref-store
//!
//! File-backed adapters for refkeep.
//!
//! - [`JsonLibrary`]: a CSL-JSON array file implementing the fix
//!   orchestrator's `Library` capability, saved atomically
//! - [`MutationTrail`]: append-only JSONL log of committed mutations
//! - [`read_check_results`]: checker output from `.jsonl` or `.json`,
//!   schema-validated before use

mod error;
mod library;
mod results;
mod trail;

pub use error::StoreError;
pub use library::JsonLibrary;
pub use results::{read_check_results, read_json};
pub use trail::MutationTrail;
