// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-parse attempt registry
//!
//! Tracks, for one parse pass, the mapping from full test name to its slot
//! in the run and to its monotonically increasing attempt counter. One
//! registry is created per parse invocation alongside the [`Run`] it
//! indexes; nothing here outlives the pass or leaks across calls.

use std::collections::HashMap;

use crate::model::{Run, TestRun};

/// Name-to-slot and name-to-counter bookkeeping for one parse pass
#[derive(Debug, Default)]
pub struct AttemptRegistry {
    slots: HashMap<String, usize>,
    counters: HashMap<String, usize>,
}

impl AttemptRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of the test run for `full_name`, creating and
    /// appending a new one when absent.
    ///
    /// An existing entry's short name is never overwritten, even if a
    /// later Enter line presents a different one: first write wins.
    pub fn test_run_slot(&mut self, run: &mut Run, full_name: &str, short_name: &str) -> usize {
        if let Some(&slot) = self.slots.get(full_name) {
            return slot;
        }
        run.test_runs.push(TestRun::new(full_name, short_name));
        let slot = run.test_runs.len() - 1;
        self.slots.insert(full_name.to_string(), slot);
        slot
    }

    /// Return the next attempt number for `full_name`: 0 on the first
    /// call, incrementing on each subsequent call for the same name.
    pub fn next_attempt_no(&mut self, full_name: &str) -> usize {
        let counter = self.counters.entry(full_name.to_string()).or_insert(0);
        let attempt_no = *counter;
        *counter += 1;
        attempt_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_attempt_numbers_increment_per_name() {
        let mut registry = AttemptRegistry::new();
        assert_eq!(registry.next_attempt_no("a"), 0);
        assert_eq!(registry.next_attempt_no("a"), 1);
        assert_eq!(registry.next_attempt_no("b"), 0);
        assert_eq!(registry.next_attempt_no("a"), 2);
    }

    #[test]
    fn test_slot_reuse_and_first_short_name_wins() {
        let mut run = Run::new(String::new());
        let mut registry = AttemptRegistry::new();

        let first = registry.test_run_slot(&mut run, "CaseA Full", "CaseA");
        let again = registry.test_run_slot(&mut run, "CaseA Full", "renamed");

        assert_eq!(first, again);
        assert_eq!(run.test_runs.len(), 1);
        assert_eq!(run.test_runs[0].short_name, "CaseA");
    }

    #[test]
    fn test_same_short_name_different_full_names() {
        let mut run = Run::new(String::new());
        let mut registry = AttemptRegistry::new();

        let a = registry.test_run_slot(&mut run, "suite one should pass", "should pass");
        let b = registry.test_run_slot(&mut run, "suite two should pass", "should pass");

        assert_ne!(a, b);
        assert_eq!(run.test_runs.len(), 2);
    }
}
