//! Builder-style entry point
//!
//! ```no_run
//! # use apache_avro::Schema;
//! # fn demo(v1: Schema, v2: Schema, v3: Schema) -> avro_compatibility::Result<()> {
//! use avro_compatibility::check_that;
//!
//! // Against a single schema
//! check_that(&v3)?.can_read(&v2)?.fail_if_incompatible()?;
//!
//! // Against a chronology, latest last
//! let history = vec![v1, v2];
//! let result = check_that(&v3)?.can_read_chronology().all(history.as_slice())?;
//! println!("{}", result.describe());
//! # Ok(())
//! # }
//! ```

use apache_avro::Schema;

use crate::chronology::{Checker, ChronologyScope};
use crate::direction::Direction;
use crate::error::{Result, SchemaError};
use crate::pair::{AvroPairChecker, PairwiseCheck};
use crate::result::{CheckResult, ChronologyResult};

/// Select a candidate schema to check with the Avro pairwise checker.
pub fn check_that<'a>(candidate: impl Into<Option<&'a Schema>>) -> Result<CheckSelector<'a, AvroPairChecker>> {
    check_that_with(&AvroPairChecker, candidate)
}

/// Select a candidate schema to check with a custom pairwise checker.
pub fn check_that_with<'a, C: PairwiseCheck + ?Sized>(
    checker: &'a C,
    candidate: impl Into<Option<&'a Schema>>,
) -> Result<CheckSelector<'a, C>> {
    let candidate = candidate.into().ok_or_else(SchemaError::missing_candidate)?;
    Ok(CheckSelector { checker, candidate })
}

/// A bound candidate, waiting for a direction
pub struct CheckSelector<'a, C: ?Sized> {
    checker: &'a C,
    candidate: &'a Schema,
}

impl<'a, C: PairwiseCheck + ?Sized> CheckSelector<'a, C> {
    /// Can the candidate read data written with `existing`?
    pub fn can_read(&self, existing: impl Into<Option<&'a Schema>>) -> Result<CheckResult> {
        self.against(Direction::CanRead, existing.into())
    }

    /// Can `existing` read data written with the candidate?
    pub fn can_be_read_by(&self, existing: impl Into<Option<&'a Schema>>) -> Result<CheckResult> {
        self.against(Direction::CanBeReadBy, existing.into())
    }

    /// Can each of the candidate and `existing` read the other's data?
    pub fn mutual_read_with(&self, existing: impl Into<Option<&'a Schema>>) -> Result<CheckResult> {
        self.against(Direction::MutualRead, existing.into())
    }

    pub fn can_read_chronology(&self) -> ChronologySelector<'a, C> {
        self.chronology(Direction::CanRead)
    }

    pub fn can_be_read_by_chronology(&self) -> ChronologySelector<'a, C> {
        self.chronology(Direction::CanBeReadBy)
    }

    pub fn mutual_read_with_chronology(&self) -> ChronologySelector<'a, C> {
        self.chronology(Direction::MutualRead)
    }

    fn chronology(&self, direction: Direction) -> ChronologySelector<'a, C> {
        ChronologySelector {
            checker: self.checker,
            candidate: self.candidate,
            direction,
        }
    }

    fn against(&self, direction: Direction, existing: Option<&'a Schema>) -> Result<CheckResult> {
        let existing = existing.ok_or_else(SchemaError::missing_existing)?;
        let pair = direction.resolve(self.checker, self.candidate, existing)?;
        Ok(CheckResult::new(direction, ChronologyScope::Latest, pair))
    }
}

/// A bound candidate and direction, waiting for a chronology scope
pub struct ChronologySelector<'a, C: ?Sized> {
    checker: &'a C,
    candidate: &'a Schema,
    direction: Direction,
}

impl<'a, C: PairwiseCheck + ?Sized> ChronologySelector<'a, C> {
    /// Check against every schema in `history`, latest last.
    pub fn all(&self, history: impl Into<Option<&'a [Schema]>>) -> Result<ChronologyResult> {
        self.run(ChronologyScope::All, history.into())
    }

    /// Check against the last schema in `history` only.
    pub fn latest_of(&self, history: impl Into<Option<&'a [Schema]>>) -> Result<ChronologyResult> {
        self.run(ChronologyScope::Latest, history.into())
    }

    fn run(&self, scope: ChronologyScope, history: Option<&'a [Schema]>) -> Result<ChronologyResult> {
        let history = history.ok_or_else(SchemaError::missing_history)?;
        Checker::new(scope, self.direction, self.candidate, history).run(self.checker)
    }
}
