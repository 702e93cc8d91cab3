//! # ref-schema
//!
//! JSON Schemas for every shape refkeep reads or emits.
//!
//! Types are defined in `ref-core` with `#[derive(JsonSchema)]`; this crate
//! collects them into a [`SchemaRegistry`] used to validate checker output
//! before it reaches the fix orchestrator, and to export schemas through
//! `refk schema`.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
