//! # ref-fix
//!
//! Turns check findings into committed library mutations, one operator
//! decision at a time.
//!
//! - [`action`]: the closed set of fix actions, each with its own handler
//! - [`registry`]: which actions are offered for which finding kind
//! - [`library`]: the mutation capability the handlers write through
//! - [`presenter`]: choice presentation and diagnostics capabilities
//! - [`orchestrator`]: the sequential remediation loop and its accounting
//!
//! Storage and terminal I/O live behind the capability traits; `ref-store`
//! and the `refk` binary provide the real implementations.

pub mod action;
pub mod error;
pub mod library;
pub mod orchestrator;
pub mod presenter;
pub mod registry;

pub use action::{ApplyOutcome, FixActionType};
pub use error::{FixError, LibraryError};
pub use library::{Library, RecordUpdate, RemoveOutcome, UpdateOutcome};
pub use orchestrator::{FixSession, run_fix_interaction};
pub use presenter::{ChoicePresenter, DeclineAll, Diagnostics};
pub use registry::{DefaultFixRegistry, FixActionRegistry, FixOption};
