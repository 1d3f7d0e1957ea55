//! Pairwise reader/writer comparison
//!
//! The structural comparison of two schemas is delegated to a [`PairwiseCheck`]
//! implementation. [`AvroPairChecker`] forwards to `apache_avro`'s own
//! schema-resolution rules; the policy engine never inspects schema internals.

use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};

use apache_avro::schema_compatibility::SchemaCompatibility;
use apache_avro::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Verdict of a single comparison, or the aggregate of several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaCompatibilityType {
    Compatible,
    Incompatible,
}

impl SchemaCompatibilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaCompatibilityType::Compatible => "COMPATIBLE",
            SchemaCompatibilityType::Incompatible => "INCOMPATIBLE",
        }
    }
}

impl fmt::Display for SchemaCompatibilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `apache_avro` keeps its compatibility error type private, so its fixed
// message templates are the only way to tell the variants apart.
const AVRO_FIELD_PREFIX: &str = "Incompatible schemata! Field '";
const AVRO_FIELD_TYPE_MISMATCH: &str = "' in reader schema does not match the type in the writer schema";
const AVRO_MISSING_DEFAULT: &str = "' in reader schema must have a default value";

const AVRO_MESSAGE_KINDS: &[(&str, IncompatibilityKind)] = &[
    ("Incompatible schema types!", IncompatibilityKind::TypeMismatch),
    ("Unknown type for 'writers_schema'", IncompatibilityKind::TypeMismatch),
    ("Reader's symbols must contain all writer's symbols", IncompatibilityKind::MissingEnumSymbols),
    ("All elements in union must match", IncompatibilityKind::MissingUnionBranch),
    ("Name and size don't match for fixed", IncompatibilityKind::FixedSizeMismatch),
    ("The name must be the same for both schemas", IncompatibilityKind::NameMismatch),
];

/// Kind of structural incompatibility reported by the pairwise checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncompatibilityKind {
    /// Named types (records, enums, fixed) with different full names
    NameMismatch,
    /// Fixed types of different sizes
    FixedSizeMismatch,
    /// The reader enum lacks symbols the writer can produce
    MissingEnumSymbols,
    /// A reader field is absent from the writer and has no default
    ReaderFieldMissingDefaultValue,
    /// Writer type cannot be promoted to the reader type
    TypeMismatch,
    /// A writer union branch has no matching reader branch
    MissingUnionBranch,
    Unknown,
}

impl IncompatibilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncompatibilityKind::NameMismatch => "NAME_MISMATCH",
            IncompatibilityKind::FixedSizeMismatch => "FIXED_SIZE_MISMATCH",
            IncompatibilityKind::MissingEnumSymbols => "MISSING_ENUM_SYMBOLS",
            IncompatibilityKind::ReaderFieldMissingDefaultValue => {
                "READER_FIELD_MISSING_DEFAULT_VALUE"
            }
            IncompatibilityKind::TypeMismatch => "TYPE_MISMATCH",
            IncompatibilityKind::MissingUnionBranch => "MISSING_UNION_BRANCH",
            IncompatibilityKind::Unknown => "UNKNOWN",
        }
    }

    /// Classify one level of an `apache_avro` compatibility error by its text.
    fn from_avro_message(message: &str) -> Self {
        AVRO_MESSAGE_KINDS
            .iter()
            .find(|(needle, _)| message.contains(*needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(IncompatibilityKind::Unknown)
    }
}

impl fmt::Display for IncompatibilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured reason why a reader cannot decode a writer's data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Incompatibility {
    pub kind: IncompatibilityKind,
    pub message: String,
    /// Structural path inside the reader schema, e.g. "/fields/0/type"
    pub location: String,
}

impl Incompatibility {
    pub fn new(kind: IncompatibilityKind, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}: {}' at '{}'", self.kind, self.message, self.location)
    }
}

/// Outcome of comparing one reader schema against one writer schema
#[derive(Debug, Clone, PartialEq)]
pub struct PairResult {
    verdict: SchemaCompatibilityType,
    reader: Schema,
    writer: Schema,
    description: String,
    incompatibilities: Vec<Incompatibility>,
}

impl PairResult {
    pub fn compatible(reader: Schema, writer: Schema, description: impl Into<String>) -> Self {
        Self {
            verdict: SchemaCompatibilityType::Compatible,
            reader,
            writer,
            description: description.into(),
            incompatibilities: Vec::new(),
        }
    }

    pub fn incompatible(
        reader: Schema,
        writer: Schema,
        description: impl Into<String>,
        incompatibilities: Vec<Incompatibility>,
    ) -> Self {
        Self {
            verdict: SchemaCompatibilityType::Incompatible,
            reader,
            writer,
            description: description.into(),
            incompatibilities,
        }
    }

    pub fn verdict(&self) -> SchemaCompatibilityType {
        self.verdict
    }

    pub fn is_compatible(&self) -> bool {
        self.verdict == SchemaCompatibilityType::Compatible
    }

    pub fn reader(&self) -> &Schema {
        &self.reader
    }

    pub fn writer(&self) -> &Schema {
        &self.writer
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ordered incompatibilities; empty when compatible
    pub fn incompatibilities(&self) -> &[Incompatibility] {
        &self.incompatibilities
    }
}

impl Eq for PairResult {}

impl Hash for PairResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.verdict.hash(state);
        self.reader.canonical_form().hash(state);
        self.writer.canonical_form().hash(state);
        self.description.hash(state);
        self.incompatibilities.hash(state);
    }
}

/// Structural reader/writer comparison consumed by the policy engine
pub trait PairwiseCheck {
    /// Can data written with `writer` be decoded with `reader`?
    ///
    /// An `Err` means the comparison itself could not run; it is propagated
    /// to the caller unchanged and aborts any chronology scan in progress.
    fn check_pair(&self, reader: &Schema, writer: &Schema) -> Result<PairResult>;
}

impl<C: PairwiseCheck + ?Sized> PairwiseCheck for &C {
    fn check_pair(&self, reader: &Schema, writer: &Schema) -> Result<PairResult> {
        (**self).check_pair(reader, writer)
    }
}

pub const READER_WRITER_COMPATIBLE_MESSAGE: &str =
    "Reader schema can always successfully decode data written using the writer schema.";

/// Pairwise checker backed by `apache_avro`'s schema resolution rules
#[derive(Debug, Clone, Copy, Default)]
pub struct AvroPairChecker;

impl PairwiseCheck for AvroPairChecker {
    fn check_pair(&self, reader: &Schema, writer: &Schema) -> Result<PairResult> {
        match SchemaCompatibility::can_read(writer, reader) {
            Ok(()) => Ok(PairResult::compatible(
                reader.clone(),
                writer.clone(),
                READER_WRITER_COMPATIBLE_MESSAGE,
            )),
            Err(err) => {
                let incompatibility = incompatibility_from_avro(&err);
                debug!(
                    kind = %incompatibility.kind,
                    location = %incompatibility.location,
                    "reader cannot decode writer"
                );

                let description = format!(
                    "Data encoded using writer schema:\n{}\nwill or may fail to decode using reader schema:\n{}\n",
                    writer.canonical_form(),
                    reader.canonical_form()
                );
                Ok(PairResult::incompatible(
                    reader.clone(),
                    writer.clone(),
                    description,
                    vec![incompatibility],
                ))
            }
        }
    }
}

fn quoted_field<'m>(message: &'m str, suffix: &str) -> Option<&'m str> {
    message.strip_prefix(AVRO_FIELD_PREFIX)?.strip_suffix(suffix)
}

/// Flatten an `apache_avro` compatibility error and its causes into one record.
///
/// Each field mismatch on the way down adds `/fields/<name>/type` to the
/// location; the innermost cause decides the kind. The message joins the text
/// of every level.
fn incompatibility_from_avro(err: &(dyn StdError + 'static)) -> Incompatibility {
    let mut kind = IncompatibilityKind::Unknown;
    let mut location = String::new();
    let mut messages = Vec::new();
    let mut cause = Some(err);

    while let Some(current) = cause {
        let message = current.to_string();
        if let Some(field) = quoted_field(&message, AVRO_FIELD_TYPE_MISMATCH) {
            location.push_str(&format!("/fields/{field}/type"));
        } else if let Some(field) = quoted_field(&message, AVRO_MISSING_DEFAULT) {
            location.push_str(&format!("/fields/{field}"));
            kind = IncompatibilityKind::ReaderFieldMissingDefaultValue;
        } else {
            kind = IncompatibilityKind::from_avro_message(&message);
        }
        messages.push(message);
        cause = current.source();
    }

    if location.is_empty() {
        location.push('/');
    }
    Incompatibility::new(kind, messages.join(": "), location)
}
