//! Which part of a schema chronology takes part in a check
//!
//! A chronology is ordered oldest first, latest last, and may be empty.

use std::fmt;

use apache_avro::Schema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::Direction;
use crate::error::Result;
use crate::pair::PairwiseCheck;
use crate::result::{CheckResult, ChronologyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChronologyScope {
    /// Every schema in the chronology
    All,
    /// Only the most recent schema
    Latest,
}

impl ChronologyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChronologyScope::All => "ALL",
            ChronologyScope::Latest => "LATEST",
        }
    }

    /// The existing schemas this scope compares against, in chronology order.
    pub fn select<'h>(&self, history: &'h [Schema]) -> &'h [Schema] {
        match self {
            ChronologyScope::All => history,
            ChronologyScope::Latest => match history.split_last() {
                Some((latest, _)) => std::slice::from_ref(latest),
                None => &[],
            },
        }
    }

    /// Check `candidate` against the selected part of `history`.
    ///
    /// Every selected schema is checked even after an incompatibility, so the
    /// result reports all failures. A checker error stops the scan and no
    /// partial result is returned.
    pub fn check<C: PairwiseCheck + ?Sized>(
        &self,
        checker: &C,
        direction: Direction,
        candidate: &Schema,
        history: &[Schema],
    ) -> Result<ChronologyResult> {
        let selected = self.select(history);
        debug!(
            %direction,
            scope = %self,
            history = history.len(),
            selected = selected.len(),
            "checking schema chronology"
        );

        let results = selected
            .iter()
            .map(|existing| {
                direction
                    .resolve(checker, candidate, existing)
                    .map(|pair| CheckResult::new(direction, *self, pair))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ChronologyResult::new(direction, *self, results))
    }
}

impl fmt::Display for ChronologyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully bound compatibility check, ready to run
#[derive(Debug, Clone, Copy)]
pub struct Checker<'a> {
    pub scope: ChronologyScope,
    pub direction: Direction,
    pub candidate: &'a Schema,
    /// Existing schemas, latest last
    pub history: &'a [Schema],
}

impl<'a> Checker<'a> {
    pub fn new(
        scope: ChronologyScope,
        direction: Direction,
        candidate: &'a Schema,
        history: &'a [Schema],
    ) -> Self {
        Self {
            scope,
            direction,
            candidate,
            history,
        }
    }

    pub fn run<C: PairwiseCheck + ?Sized>(&self, checker: &C) -> Result<ChronologyResult> {
        self.scope.check(checker, self.direction, self.candidate, self.history)
    }
}


#[cfg(test)]
mod proptests {
    //! Property-based tests for chronology aggregation.
    //!
    //! These tests verify that:
    //! - `All` is compatible exactly when every pairwise check is
    //! - `Latest` always equals the single check against the last schema
    //! - Diagnostics name exactly the incompatible positions

    use proptest::prelude::*;

    use super::*;
    use crate::fluent::check_that_with;
    use crate::mode::Mode;
    use crate::testing::{schema_named, ScriptedChecker};

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    /// A history of `v0..vn` and a checker rejecting, in both reader/writer
    /// orders, every entry flagged unreadable.
    fn setup(readable: &[bool]) -> (Vec<Schema>, ScriptedChecker) {
        let mut checker = ScriptedChecker::default();
        let mut history = Vec::new();
        for (i, ok) in readable.iter().enumerate() {
            let name = format!("v{i}");
            if !ok {
                checker = checker.reject("candidate", &name).reject(&name, "candidate");
            }
            history.push(schema_named(&name));
        }
        (history, checker)
    }

    proptest! {
        #[test]
        fn all_is_conjunction_of_pairs(
            readable in prop::collection::vec(any::<bool>(), 0..8),
            direction in arb_direction(),
        ) {
            let (history, checker) = setup(&readable);
            let candidate = schema_named("candidate");

            let result = ChronologyScope::All.check(&checker, direction, &candidate, &history).unwrap();

            prop_assert_eq!(result.results().len(), readable.len());
            prop_assert_eq!(result.is_compatible(), readable.iter().all(|ok| *ok));
            prop_assert_eq!(result.incompatible_count(), readable.iter().filter(|ok| !**ok).count());
            for (check, ok) in result.results().iter().zip(&readable) {
                prop_assert_eq!(check.is_compatible(), *ok);
            }
        }

        #[test]
        fn latest_equals_single_check_against_last(
            readable in prop::collection::vec(any::<bool>(), 1..8),
            direction in arb_direction(),
        ) {
            let (history, checker) = setup(&readable);
            let candidate = schema_named("candidate");

            let result = Mode::from_parts(direction, ChronologyScope::Latest)
                .check_with(&checker, &candidate, history.as_slice())
                .unwrap();

            let selector = check_that_with(&checker, &candidate).unwrap();
            let last = &history[history.len() - 1];
            let single = match direction {
                Direction::CanRead => selector.can_read(last).unwrap(),
                Direction::CanBeReadBy => selector.can_be_read_by(last).unwrap(),
                Direction::MutualRead => selector.mutual_read_with(last).unwrap(),
            };

            prop_assert_eq!(result.results(), &[single][..]);
            prop_assert_eq!(result.is_compatible(), readable[readable.len() - 1]);
        }

        #[test]
        fn describe_names_incompatible_positions(
            readable in prop::collection::vec(any::<bool>(), 1..8),
        ) {
            let (history, checker) = setup(&readable);
            let candidate = schema_named("candidate");

            let result = Mode::CanReadAll
                .check_with(&checker, &candidate, history.as_slice())
                .unwrap();
            let message = result.describe();

            for (i, ok) in readable.iter().enumerate() {
                let segment = format!(
                    "Schema[{i}] has incompatibilities: ['TYPE_MISMATCH: candidate cannot read v{i}' at '/']"
                );
                prop_assert_eq!(message.contains(&segment), !ok);
            }
            prop_assert_eq!(result.fail_if_incompatible().is_ok(), readable.iter().all(|ok| *ok));
        }
    }
}
