//! Schema fingerprints for reports
//!
//! The Avro parsing canonical form strips field defaults, so two schemas that
//! differ only in a default (and therefore in compatibility) share a canonical
//! form. Fingerprints hash the full schema JSON instead.

use apache_avro::Schema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::Result;

/// SHA256 fingerprint of a schema's full JSON form, defaults included
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaFingerprint(String);

impl SchemaFingerprint {
    /// Fingerprint a parsed schema
    pub fn of(schema: &Schema) -> Result<Self> {
        Ok(Self::from_json(&serde_json::to_string(schema)?))
    }

    /// Fingerprint a schema's JSON text as given
    pub fn from_json(json: &str) -> Self {
        let hash = Sha256::digest(json.as_bytes());
        Self(format!("{:x}", hash))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for terminal output
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for SchemaFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
