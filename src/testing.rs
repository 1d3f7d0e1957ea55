//! Test doubles shared by the unit tests

use std::cell::RefCell;
use std::collections::HashSet;

use apache_avro::Schema;

use crate::error::{Result, SchemaError};
use crate::pair::{Incompatibility, IncompatibilityKind, PairResult, PairwiseCheck};

/// An empty record schema whose only distinguishing feature is its name
pub fn schema_named(name: &str) -> Schema {
    Schema::parse_str(&format!(r#"{{"type":"record","name":"{name}","fields":[]}}"#)).unwrap()
}

pub fn name_of(schema: &Schema) -> String {
    let json: serde_json::Value = serde_json::from_str(&schema.canonical_form()).unwrap();
    json["name"].as_str().unwrap_or_default().to_string()
}

/// Pairwise checker driven by schema names: every pair is compatible unless
/// rejected, and every call is recorded as `(reader, writer)`.
#[derive(Default)]
pub struct ScriptedChecker {
    rejected: HashSet<(String, String)>,
    failing: HashSet<(String, String)>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedChecker {
    pub fn reject(mut self, reader: &str, writer: &str) -> Self {
        self.rejected.insert((reader.to_string(), writer.to_string()));
        self
    }

    pub fn fail(mut self, reader: &str, writer: &str) -> Self {
        self.failing.insert((reader.to_string(), writer.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl PairwiseCheck for ScriptedChecker {
    fn check_pair(&self, reader: &Schema, writer: &Schema) -> Result<PairResult> {
        let pair = (name_of(reader), name_of(writer));
        self.calls.borrow_mut().push(pair.clone());

        if self.failing.contains(&pair) {
            return Err(SchemaError::Comparison(format!("{} vs {}", pair.0, pair.1)));
        }
        if self.rejected.contains(&pair) {
            let message = format!("{} cannot read {}", pair.0, pair.1);
            return Ok(PairResult::incompatible(
                reader.clone(),
                writer.clone(),
                message.clone(),
                vec![Incompatibility::new(IncompatibilityKind::TypeMismatch, message, "/")],
            ));
        }
        Ok(PairResult::compatible(
            reader.clone(),
            writer.clone(),
            format!("{} reads {}", pair.0, pair.1),
        ))
    }
}
