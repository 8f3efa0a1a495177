// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parsed test-run model
//!
//! One [`Run`] is produced per parse invocation and exclusively owns all
//! [`TestRun`], [`Attempt`], and [`Event`] data beneath it. Test runs are
//! kept in first-seen order; attempts within a test run are kept in
//! creation order, so the vector index is the attempt number.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Status of an attempt or nested event
///
/// The parser only ever transitions Pending to Failed (on a `[FAILED]`
/// marker) or, for completed phase events, to Passed. Timeout exists for
/// downstream consumers of the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    /// No terminal marker observed yet
    #[default]
    Pending,
    /// Completed successfully
    Passed,
    /// A failure marker was observed
    Failed,
    /// Timed out
    Timeout,
}

impl AttemptStatus {
    /// Whether this status is Failed
    #[must_use]
    pub fn is_failed(self) -> bool {
        self == Self::Failed
    }
}

/// A sub-span within an attempt, e.g. a backup or restore phase.
///
/// Best-effort: populated from auxiliary phase patterns and never required
/// for the owning attempt to be valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Phase name, e.g. "backup" or "restore"
    pub name: String,
    /// Time the phase started, when a timestamp could be extracted
    pub start_time: Option<NaiveDateTime>,
    /// Time the phase completed, when observed
    pub end_time: Option<NaiveDateTime>,
    /// End minus start, when both are known
    #[serde(with = "duration_ms")]
    pub duration: Option<TimeDelta>,
    /// Pending until the completion line is seen, then Passed
    pub status: AttemptStatus,
    /// The raw lines that opened and closed the phase
    pub logs: Vec<String>,
}

impl Event {
    /// Create a phase event opened at `start_time`.
    #[must_use]
    pub fn open(name: &str, start_time: Option<NaiveDateTime>) -> Self {
        Self {
            name: name.to_string(),
            start_time,
            end_time: None,
            duration: None,
            status: AttemptStatus::Pending,
            logs: Vec::new(),
        }
    }
}

/// One execution of a test.
///
/// Created on an Enter marker and mutated in place until its Exit marker
/// (or end of input). Timestamps stay `None` when the marker timestamp was
/// unparsable; `duration` is only set once both ends are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Attempt number, 0-based per test name in encounter order
    pub attempt_no: usize,
    /// Full name of the owning test
    pub name: String,
    /// Time of the Enter marker
    pub start_time: Option<NaiveDateTime>,
    /// Time of the Exit marker
    pub end_time: Option<NaiveDateTime>,
    /// End minus start, set when the Exit marker is processed
    #[serde(with = "duration_ms")]
    pub duration: Option<TimeDelta>,
    /// Pending until a failure marker is observed
    pub status: AttemptStatus,
    /// Raw log lines belonging to this attempt, Enter/Exit lines included
    pub logs: Vec<String>,
    /// Nested phase events, creation order
    pub events: Vec<Event>,
}

impl Attempt {
    /// Create a fresh attempt for `name`.
    #[must_use]
    pub fn new(attempt_no: usize, name: &str) -> Self {
        Self {
            attempt_no,
            name: name.to_string(),
            start_time: None,
            end_time: None,
            duration: None,
            status: AttemptStatus::Pending,
            logs: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Whether this attempt failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status.is_failed()
    }
}

/// All attempts sharing one full test name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    /// Full test name, unique within a run
    pub name: String,
    /// Display label, set from the first Enter marker and never overwritten
    pub short_name: String,
    /// Attempts in creation order; index equals attempt number
    pub attempts: Vec<Attempt>,
}

impl TestRun {
    /// Create an empty test run.
    #[must_use]
    pub fn new(name: &str, short_name: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name.to_string(),
            attempts: Vec::new(),
        }
    }

    /// Number of failed attempts
    #[must_use]
    pub fn failed_attempts(&self) -> usize {
        self.attempts.iter().filter(|a| a.failed()).count()
    }
}

/// The complete parsed result of one log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The full raw log text, immutable once captured
    pub full_logs: String,
    /// Test runs in first-seen order of their full names
    pub test_runs: Vec<TestRun>,
}

impl Run {
    /// Create a run holding the raw log text and no test runs yet.
    #[must_use]
    pub fn new(full_logs: String) -> Self {
        Self {
            full_logs,
            test_runs: Vec::new(),
        }
    }

    /// Look up a test run by its full name.
    #[must_use]
    pub fn test_run(&self, name: &str) -> Option<&TestRun> {
        self.test_runs.iter().find(|tr| tr.name == name)
    }

    /// Total number of attempts across all test runs
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.test_runs.iter().map(|tr| tr.attempts.len()).sum()
    }
}

/// Serialize an optional `TimeDelta` as whole milliseconds.
mod duration_ms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<TimeDelta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(|d| d.num_milliseconds()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeDelta>, D::Error> {
        let ms = Option::<i64>::deserialize(deserializer)?;
        Ok(ms.map(TimeDelta::milliseconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_new_attempt_defaults() {
        let attempt = Attempt::new(0, "CaseA Full");
        assert_eq!(attempt.status, AttemptStatus::Pending);
        assert!(attempt.start_time.is_none());
        assert!(attempt.duration.is_none());
        assert!(attempt.logs.is_empty());
        assert!(!attempt.failed());
    }

    #[test]
    fn test_failed_attempt_counting() {
        let mut test_run = TestRun::new("CaseA Full", "CaseA");
        test_run.attempts.push(Attempt::new(0, "CaseA Full"));
        test_run.attempts.push(Attempt::new(1, "CaseA Full"));
        test_run.attempts[0].status = AttemptStatus::Failed;

        assert_eq!(test_run.failed_attempts(), 1);
    }

    #[test]
    fn test_duration_serializes_as_milliseconds() {
        let mut attempt = Attempt::new(0, "CaseA Full");
        attempt.duration = Some(TimeDelta::milliseconds(5044));

        let json = serde_json::to_value(&attempt).expect("should serialize");
        assert_eq!(json["duration"], 5044);

        let back: Attempt = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(back.duration, Some(TimeDelta::milliseconds(5044)));
    }
}
