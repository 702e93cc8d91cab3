//! Entity structs for the refkeep domain.
//!
//! Records follow CSL-JSON field naming so a library file written by other
//! reference managers loads unchanged. All structs derive `Serialize`,
//! `Deserialize` and `JsonSchema` for roundtrip and schema validation.

mod author;
mod check;
mod date;
mod number;
mod record;
mod remote;

pub use author::AuthorName;
pub use check::{CheckFinding, CheckResult, FindingDetails};
pub use date::DateField;
pub use number::StringOrNumber;
pub use record::BibliographicRecord;
pub use remote::{OneOrMany, RemoteMetadata};
