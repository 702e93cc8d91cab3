//! # ref-core
//!
//! Core types shared by every refkeep crate.
//!
//! - Bibliographic entities (CSL-JSON shaped records, author names, dates)
//! - Provider-shaped remote metadata snapshots
//! - Check findings and per-record check results
//! - Closed enums for finding kinds, check status, classifications and
//!   duplicate evidence
//! - Result shapes returned to callers (comparison, duplicate, fix summary)
//! - JSONL mutation trail envelope
//! - Cross-cutting error type

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod trail;
