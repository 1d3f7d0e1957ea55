//! Avro Schema Compatibility
//!
//! Checks whether a candidate Avro schema evolves safely relative to a
//! chronology of previously published schemas.
//!
//! ## Policies
//!
//! A policy crosses a [`Direction`] with a [`ChronologyScope`]:
//!
//! - **Direction**: can the candidate read old data (`CanRead`), can old
//!   readers read the candidate's data (`CanBeReadBy`), or both (`MutualRead`)?
//! - **Scope**: compare against the latest schema only (`Latest`), or against
//!   every schema in the chronology (`All`).
//!
//! The six combinations are exposed as [`Mode`]s, named after the usual
//! schema registry terms (backward, forward, full and their transitive forms).
//!
//! ## Architecture
//!
//! ```text
//! Mode / check_that(..)        policy selection
//!   └── ChronologyScope        which historical schemas take part
//!         └── Direction        which schema is reader, which is writer
//!               └── PairwiseCheck   structural comparison (apache_avro)
//! ```
//!
//! Results aggregate into a [`ChronologyResult`] that can be queried,
//! described, or turned into an error with `fail_if_incompatible`.

pub mod chronology;
pub mod config;
pub mod direction;
pub mod error;
pub mod fingerprint;
pub mod fluent;
pub mod history;
pub mod mode;
pub mod pair;
pub mod report;
pub mod result;
pub mod version;

#[cfg(test)]
mod testing;

pub use chronology::{Checker, ChronologyScope};
pub use direction::Direction;
pub use error::{Result, SchemaCompatibilityError, SchemaError};
pub use fingerprint::SchemaFingerprint;
pub use fluent::{check_that, check_that_with, CheckSelector, ChronologySelector};
pub use mode::Mode;
pub use pair::{
    AvroPairChecker, Incompatibility, IncompatibilityKind, PairResult, PairwiseCheck,
    SchemaCompatibilityType,
};
pub use report::CompatibilityReport;
pub use result::{CheckResult, ChronologyResult};
pub use version::SchemaVersion;

pub use apache_avro::Schema;
