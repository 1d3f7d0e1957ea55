//! Which schema plays reader and which plays writer

use std::fmt;

use apache_avro::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::pair::{PairResult, PairwiseCheck};

/// Direction in which a candidate schema must be compatible with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// The candidate can read data written with the existing schema
    CanRead,
    /// Data written with the candidate can be read by the existing schema
    CanBeReadBy,
    /// Both of the above
    MutualRead,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::CanRead, Direction::CanBeReadBy, Direction::MutualRead];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::CanRead => "CAN_READ",
            Direction::CanBeReadBy => "CAN_BE_READ_BY",
            Direction::MutualRead => "MUTUAL_READ",
        }
    }

    /// Compare `candidate` with one `existing` schema in this direction.
    ///
    /// `MutualRead` checks that `existing` can read `candidate` first and
    /// returns that result as soon as it is incompatible. Only when it holds
    /// is the candidate checked as a reader, and that second result is the
    /// one returned.
    pub fn resolve<C: PairwiseCheck + ?Sized>(
        &self,
        checker: &C,
        candidate: &Schema,
        existing: &Schema,
    ) -> Result<PairResult> {
        match self {
            Direction::CanRead => checker.check_pair(candidate, existing),
            Direction::CanBeReadBy => checker.check_pair(existing, candidate),
            Direction::MutualRead => {
                let can_be_read = checker.check_pair(existing, candidate)?;
                if !can_be_read.is_compatible() {
                    debug!("existing schema cannot read candidate, skipping reverse check");
                    return Ok(can_be_read);
                }
                checker.check_pair(candidate, existing)
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
