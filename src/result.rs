//! Compatibility check results and their diagnostics

use std::fmt;

use apache_avro::Schema;

use crate::chronology::ChronologyScope;
use crate::direction::Direction;
use crate::error::SchemaCompatibilityError;
use crate::pair::{Incompatibility, PairResult, SchemaCompatibilityType};

fn join_incompatibilities(incompatibilities: &[Incompatibility]) -> String {
    incompatibilities
        .iter()
        .map(|incompatibility| incompatibility.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Result of checking the candidate against one existing schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckResult {
    direction: Direction,
    scope: ChronologyScope,
    pair: PairResult,
}

impl CheckResult {
    pub fn new(direction: Direction, scope: ChronologyScope, pair: PairResult) -> Self {
        Self { direction, scope, pair }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scope(&self) -> ChronologyScope {
        self.scope
    }

    pub fn pair(&self) -> &PairResult {
        &self.pair
    }

    pub fn compatibility_type(&self) -> SchemaCompatibilityType {
        self.pair.verdict()
    }

    pub fn is_compatible(&self) -> bool {
        self.pair.is_compatible()
    }

    pub fn reader(&self) -> &Schema {
        self.pair.reader()
    }

    pub fn writer(&self) -> &Schema {
        self.pair.writer()
    }

    pub fn description(&self) -> &str {
        self.pair.description()
    }

    pub fn incompatibilities(&self) -> &[Incompatibility] {
        self.pair.incompatibilities()
    }

    /// Human-readable verdict listing every incompatibility
    pub fn describe(&self) -> String {
        if self.is_compatible() {
            format!("Compatibility type '{}' holds between schemas.", self.direction)
        } else {
            format!(
                "Compatibility type '{}' does not hold between schemas, incompatibilities: [{}].",
                self.direction,
                join_incompatibilities(self.incompatibilities())
            )
        }
    }

    pub fn fail_if_incompatible(&self) -> Result<(), SchemaCompatibilityError> {
        if self.is_compatible() {
            Ok(())
        } else {
            Err(SchemaCompatibilityError::Pair(Box::new(self.clone())))
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Aggregate result of checking the candidate against a schema chronology
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChronologyResult {
    direction: Direction,
    scope: ChronologyScope,
    results: Vec<CheckResult>,
}

impl ChronologyResult {
    pub fn new(direction: Direction, scope: ChronologyScope, results: Vec<CheckResult>) -> Self {
        Self {
            direction,
            scope,
            results,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scope(&self) -> ChronologyScope {
        self.scope
    }

    /// Per-schema results, in chronology order
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// True when every contained check holds; vacuously true when empty.
    pub fn is_compatible(&self) -> bool {
        self.results.iter().all(CheckResult::is_compatible)
    }

    pub fn compatibility_type(&self) -> SchemaCompatibilityType {
        if self.is_compatible() {
            SchemaCompatibilityType::Compatible
        } else {
            SchemaCompatibilityType::Incompatible
        }
    }

    pub fn incompatible_count(&self) -> usize {
        self.results.iter().filter(|result| !result.is_compatible()).count()
    }

    /// Human-readable verdict naming each incompatible position in the chronology.
    ///
    /// Compatible positions are skipped entirely; segments are joined by `", "`.
    pub fn describe(&self) -> String {
        if self.is_compatible() {
            return format!(
                "Compatibility type '{}' holds for '{}' schema(s).",
                self.direction, self.scope
            );
        }

        let segments: Vec<String> = self
            .results
            .iter()
            .enumerate()
            .filter(|(_, result)| !result.is_compatible())
            .map(|(index, result)| {
                format!(
                    "Schema[{}] has incompatibilities: [{}]",
                    index,
                    join_incompatibilities(result.incompatibilities())
                )
            })
            .collect();

        format!(
            "Compatibility type '{}' does not hold between {} schema(s) in the chronology because: {}.",
            self.direction,
            self.incompatible_count(),
            segments.join(", ")
        )
    }

    pub fn fail_if_incompatible(&self) -> Result<(), SchemaCompatibilityError> {
        if self.is_compatible() {
            Ok(())
        } else {
            Err(SchemaCompatibilityError::Chronology(Box::new(self.clone())))
        }
    }
}

impl fmt::Display for ChronologyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;
    use crate::pair::IncompatibilityKind;

    fn reader() -> Schema {
        Schema::parse_str(r#""int""#).unwrap()
    }

    fn writer() -> Schema {
        Schema::parse_str(r#""long""#).unwrap()
    }

    fn pair_compatible() -> PairResult {
        PairResult::compatible(reader(), writer(), "description")
    }

    fn pair_incompatible() -> PairResult {
        PairResult::incompatible(
            reader(),
            writer(),
            "description",
            vec![Incompatibility::new(IncompatibilityKind::FixedSizeMismatch, "message", "/")],
        )
    }

    fn result_compatible() -> CheckResult {
        CheckResult::new(Direction::CanRead, ChronologyScope::All, pair_compatible())
    }

    fn result_incompatible() -> CheckResult {
        CheckResult::new(Direction::CanRead, ChronologyScope::All, pair_incompatible())
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_check_result_equality() {
        let base = result_compatible();
        assert_eq!(base, result_compatible());
        assert_ne!(base, CheckResult::new(Direction::CanBeReadBy, ChronologyScope::All, pair_compatible()));
        assert_ne!(base, CheckResult::new(Direction::CanRead, ChronologyScope::Latest, pair_compatible()));
        assert_ne!(base, result_incompatible());
    }

    #[test]
    fn test_check_result_hash() {
        let base = hash_of(&result_compatible());
        assert_eq!(base, hash_of(&result_compatible()));
        assert_ne!(
            base,
            hash_of(&CheckResult::new(Direction::CanBeReadBy, ChronologyScope::All, pair_compatible()))
        );
        assert_ne!(base, hash_of(&result_incompatible()));
    }

    #[test]
    fn test_check_result_accessors() {
        let result = result_incompatible();

        assert_eq!(result.scope(), ChronologyScope::All);
        assert_eq!(result.direction(), Direction::CanRead);
        assert_eq!(result.description(), "description");
        assert_eq!(result.pair(), &pair_incompatible());
        assert_eq!(result.reader(), &reader());
        assert_eq!(result.writer(), &writer());
        assert_eq!(result.compatibility_type(), SchemaCompatibilityType::Incompatible);
        assert!(!result.is_compatible());
    }

    #[test]
    fn test_check_result_describe() {
        assert_eq!(
            result_incompatible().describe(),
            "Compatibility type 'CAN_READ' does not hold between schemas, incompatibilities: ['FIXED_SIZE_MISMATCH: message' at '/']."
        );
        assert_eq!(
            result_compatible().describe(),
            "Compatibility type 'CAN_READ' holds between schemas."
        );
    }

    #[test]
    fn test_check_result_fail_if_incompatible() {
        assert!(result_compatible().fail_if_incompatible().is_ok());

        let err = result_incompatible().fail_if_incompatible().unwrap_err();
        assert_eq!(err.check_result(), Some(&result_incompatible()));
        assert_eq!(err.to_string(), result_incompatible().describe());
    }

    #[test]
    fn test_chronology_equality_and_hash() {
        let base = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_compatible()]);
        let same = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_compatible()]);
        let other_results =
            ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_incompatible()]);
        let other_scope =
            ChronologyResult::new(Direction::CanRead, ChronologyScope::Latest, vec![result_compatible()]);
        let other_direction =
            ChronologyResult::new(Direction::CanBeReadBy, ChronologyScope::All, vec![result_compatible()]);

        assert_eq!(base, same);
        assert_eq!(hash_of(&base), hash_of(&same));
        assert_ne!(base, other_results);
        assert_ne!(base, other_scope);
        assert_ne!(base, other_direction);
        assert_ne!(hash_of(&base), hash_of(&other_results));
    }

    #[test]
    fn test_chronology_accessors() {
        let result = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_incompatible()]);

        assert_eq!(result.scope(), ChronologyScope::All);
        assert_eq!(result.direction(), Direction::CanRead);
        assert_eq!(result.results(), &[result_incompatible()]);
        assert_eq!(result.compatibility_type(), SchemaCompatibilityType::Incompatible);
        assert!(!result.is_compatible());
    }

    #[test]
    fn test_empty_chronology_is_compatible() {
        let result = ChronologyResult::new(Direction::MutualRead, ChronologyScope::Latest, Vec::new());
        assert!(result.is_compatible());
        assert_eq!(result.incompatible_count(), 0);
        assert_eq!(
            result.describe(),
            "Compatibility type 'MUTUAL_READ' holds for 'LATEST' schema(s)."
        );
    }

    #[test]
    fn test_chronology_describe_single_failure() {
        let result = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_incompatible()]);
        assert_eq!(
            result.describe(),
            "Compatibility type 'CAN_READ' does not hold between 1 schema(s) in the chronology because: Schema[0] has incompatibilities: ['FIXED_SIZE_MISMATCH: message' at '/']."
        );
    }

    #[test]
    fn test_chronology_describe_skips_compatible_positions() {
        // ", " only separates listed segments; a skipped position adds nothing
        let trailing = ChronologyResult::new(
            Direction::CanRead,
            ChronologyScope::All,
            vec![result_compatible(), result_incompatible()],
        );
        assert_eq!(
            trailing.describe(),
            "Compatibility type 'CAN_READ' does not hold between 1 schema(s) in the chronology because: \
             Schema[1] has incompatibilities: ['FIXED_SIZE_MISMATCH: message' at '/']."
        );

        let result = ChronologyResult::new(
            Direction::CanRead,
            ChronologyScope::All,
            vec![result_compatible(), result_incompatible(), result_incompatible()],
        );
        assert_eq!(
            result.describe(),
            "Compatibility type 'CAN_READ' does not hold between 2 schema(s) in the chronology because: \
             Schema[1] has incompatibilities: ['FIXED_SIZE_MISMATCH: message' at '/'], \
             Schema[2] has incompatibilities: ['FIXED_SIZE_MISMATCH: message' at '/']."
        );
    }

    #[test]
    fn test_chronology_fail_if_incompatible() {
        let ok = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_compatible()]);
        assert!(ok.fail_if_incompatible().is_ok());

        let failing = ChronologyResult::new(Direction::CanRead, ChronologyScope::All, vec![result_incompatible()]);
        let err = failing.fail_if_incompatible().unwrap_err();
        assert_eq!(err.chronology_result(), Some(&failing));
        assert!(err.check_result().is_none());
    }
}
