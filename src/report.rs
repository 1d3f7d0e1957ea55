//! Serializable compatibility reports

use serde::Serialize;

use crate::chronology::ChronologyScope;
use crate::direction::Direction;
use crate::error::Result;
use crate::fingerprint::SchemaFingerprint;
use crate::mode::Mode;
use crate::pair::Incompatibility;
use crate::result::{CheckResult, ChronologyResult};

/// Machine-readable view of a [`ChronologyResult`]
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityReport {
    pub mode: Mode,
    pub direction: Direction,
    pub scope: ChronologyScope,
    pub compatible: bool,
    pub message: String,
    pub checks: Vec<CheckReport>,
}

/// One checked (reader, writer) pair
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Position of the entry in the checked results
    pub index: usize,
    pub compatible: bool,
    /// Full-JSON fingerprints, so schemas differing only in a default differ here too
    pub reader: SchemaFingerprint,
    pub writer: SchemaFingerprint,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incompatibilities: Vec<Incompatibility>,
}

impl CheckReport {
    fn new(index: usize, result: &CheckResult) -> Result<Self> {
        Ok(Self {
            index,
            compatible: result.is_compatible(),
            reader: SchemaFingerprint::of(result.reader())?,
            writer: SchemaFingerprint::of(result.writer())?,
            description: result.description().to_string(),
            incompatibilities: result.incompatibilities().to_vec(),
        })
    }
}

impl CompatibilityReport {
    pub fn from_result(result: &ChronologyResult) -> Result<Self> {
        let checks = result
            .results()
            .iter()
            .enumerate()
            .map(|(index, check)| CheckReport::new(index, check))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            mode: Mode::from_parts(result.direction(), result.scope()),
            direction: result.direction(),
            scope: result.scope(),
            compatible: result.is_compatible(),
            message: result.describe(),
            checks,
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
