//! Named compatibility policies
//!
//! | Mode | Direction | Scope | Registry name |
//! |---|---|---|---|
//! | `CanReadLatest` | `CanRead` | `Latest` | backward |
//! | `CanReadAll` | `CanRead` | `All` | backward-transitive |
//! | `CanBeReadByLatest` | `CanBeReadBy` | `Latest` | forward |
//! | `CanBeReadByAll` | `CanBeReadBy` | `All` | forward-transitive |
//! | `MutualReadWithLatest` | `MutualRead` | `Latest` | full |
//! | `MutualReadWithAll` | `MutualRead` | `All` | full-transitive |

use std::fmt;
use std::str::FromStr;

use apache_avro::Schema;
use serde::{Deserialize, Serialize};

use crate::chronology::{Checker, ChronologyScope};
use crate::direction::Direction;
use crate::error::{Result, SchemaError};
use crate::pair::{AvroPairChecker, PairwiseCheck};
use crate::result::ChronologyResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Also known as 'backward'. Can read the data written by the most recent previous schema.
    CanReadLatest,
    /// Also known as 'backward transitive'. Can read the data written by all earlier schemas.
    CanReadAll,
    /// Also known as 'forward'. Data written by this schema can be read by the most recent previous schema.
    CanBeReadByLatest,
    /// Also known as 'forward transitive'. Data written by this schema can be read by all earlier schemas.
    CanBeReadByAll,
    /// Also known as 'full'. Backward and forward compatible with the most recent previous schema.
    MutualReadWithLatest,
    /// Also known as 'full transitive'. Backward and forward compatible with all earlier schemas.
    MutualReadWithAll,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::CanReadLatest,
        Mode::CanReadAll,
        Mode::CanBeReadByLatest,
        Mode::CanBeReadByAll,
        Mode::MutualReadWithLatest,
        Mode::MutualReadWithAll,
    ];

    pub fn direction(&self) -> Direction {
        match self {
            Mode::CanReadLatest | Mode::CanReadAll => Direction::CanRead,
            Mode::CanBeReadByLatest | Mode::CanBeReadByAll => Direction::CanBeReadBy,
            Mode::MutualReadWithLatest | Mode::MutualReadWithAll => Direction::MutualRead,
        }
    }

    pub fn scope(&self) -> ChronologyScope {
        match self {
            Mode::CanReadLatest | Mode::CanBeReadByLatest | Mode::MutualReadWithLatest => {
                ChronologyScope::Latest
            }
            Mode::CanReadAll | Mode::CanBeReadByAll | Mode::MutualReadWithAll => ChronologyScope::All,
        }
    }

    pub fn from_parts(direction: Direction, scope: ChronologyScope) -> Self {
        match (direction, scope) {
            (Direction::CanRead, ChronologyScope::Latest) => Mode::CanReadLatest,
            (Direction::CanRead, ChronologyScope::All) => Mode::CanReadAll,
            (Direction::CanBeReadBy, ChronologyScope::Latest) => Mode::CanBeReadByLatest,
            (Direction::CanBeReadBy, ChronologyScope::All) => Mode::CanBeReadByAll,
            (Direction::MutualRead, ChronologyScope::Latest) => Mode::MutualReadWithLatest,
            (Direction::MutualRead, ChronologyScope::All) => Mode::MutualReadWithAll,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::CanReadLatest => "CAN_READ_LATEST",
            Mode::CanReadAll => "CAN_READ_ALL",
            Mode::CanBeReadByLatest => "CAN_BE_READ_BY_LATEST",
            Mode::CanBeReadByAll => "CAN_BE_READ_BY_ALL",
            Mode::MutualReadWithLatest => "MUTUAL_READ_WITH_LATEST",
            Mode::MutualReadWithAll => "MUTUAL_READ_WITH_ALL",
        }
    }

    /// Schema registry name for this policy
    pub fn alias(&self) -> &'static str {
        match self {
            Mode::CanReadLatest => "backward",
            Mode::CanReadAll => "backward-transitive",
            Mode::CanBeReadByLatest => "forward",
            Mode::CanBeReadByAll => "forward-transitive",
            Mode::MutualReadWithLatest => "full",
            Mode::MutualReadWithAll => "full-transitive",
        }
    }

    /// Check `candidate` against `history` (latest last) with the Avro checker.
    ///
    /// Fails with [`SchemaError::InvalidArgument`] before any comparison when
    /// either argument is absent.
    pub fn check<'a>(
        self,
        candidate: impl Into<Option<&'a Schema>>,
        history: impl Into<Option<&'a [Schema]>>,
    ) -> Result<ChronologyResult> {
        self.check_with(&AvroPairChecker, candidate, history)
    }

    /// Like [`Mode::check`], with an explicit pairwise checker.
    pub fn check_with<'a, C: PairwiseCheck + ?Sized>(
        self,
        checker: &C,
        candidate: impl Into<Option<&'a Schema>>,
        history: impl Into<Option<&'a [Schema]>>,
    ) -> Result<ChronologyResult> {
        let candidate = candidate.into().ok_or_else(SchemaError::missing_candidate)?;
        let history = history.into().ok_or_else(SchemaError::missing_history)?;
        Checker::new(self.scope(), self.direction(), candidate, history).run(checker)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SchemaError;

    /// Accepts `CAN_READ_ALL`, `can-read-all` or `backward-transitive`, in any case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Mode::ALL
            .into_iter()
            .find(|mode| {
                mode.alias() == normalized
                    || mode.as_str().to_ascii_lowercase().replace('_', "-") == normalized
            })
            .ok_or_else(|| SchemaError::InvalidArgument(format!("Unknown compatibility mode: {s}")))
    }
}

impl TryFrom<String> for Mode {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.alias().to_string()
    }
}
