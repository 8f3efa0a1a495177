// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line-oriented parsing state machine
//!
//! Consumes a fully materialized build log one line at a time and populates
//! a [`Run`]. The machine has two states: no open attempt, or an open
//! attempt addressed by a cursor of indices into the run being built.
//!
//! Transition policy:
//!
//! - Enter: allocate a new attempt and move the cursor to it. A previous
//!   attempt that never saw its Exit is left exactly as-is.
//! - Exit: record end time and duration on the current attempt. The cursor
//!   is deliberately NOT cleared, so trailing lines after the final Exit
//!   stay attributable to the last attempt.
//! - Exit or `[FAILED]` with no open attempt: tolerated no-op, logged as a
//!   warning.
//! - Plain line: appended verbatim to the open attempt, dropped otherwise.
//!
//! Only an empty input fails the call. Unparsable marker timestamps leave
//! the affected field unset and never discard accumulated attempts.
//!
//! # Example
//!
//! ```
//! use demyst_log::parse_log;
//!
//! let run = parse_log("> Enter [It] a - a full @ 01/02/24 10:00:00\n", "It").unwrap();
//! assert_eq!(run.test_runs[0].attempts[0].attempt_no, 0);
//! ```

use tracing::{debug, warn};

use crate::error::LogError;
use crate::marker::{EnterMarker, ExitMarker, LineKind, MarkerSet, PhaseMark, match_phase};
use crate::model::{Attempt, AttemptStatus, Event, Run};
use crate::registry::AttemptRegistry;
use crate::timestamp::{parse_marker_time, scan_line_time};

/// Logs shorter than this are usually a sign of an infra failure upstream.
const SHORT_LOG_LINES: usize = 100;

/// Cursor addressing the currently open attempt inside the run
#[derive(Debug, Clone, Copy)]
struct Cursor {
    test: usize,
    attempt: usize,
}

/// Reusable parser for one anchor tag
#[derive(Debug)]
pub struct LogParser {
    markers: MarkerSet,
}

impl LogParser {
    /// Build a parser whose Enter/Exit markers are anchored on `anchor_tag`
    /// (usually `"It"`).
    ///
    /// # Errors
    ///
    /// Returns `LogError::Pattern` if the marker patterns fail to compile.
    pub fn new(anchor_tag: &str) -> Result<Self, LogError> {
        Ok(Self {
            markers: MarkerSet::new(anchor_tag)?,
        })
    }

    /// Parse a complete build log into a [`Run`].
    ///
    /// # Errors
    ///
    /// Returns `LogError::EmptyLog` when `text` is empty. All other
    /// malformed-input conditions degrade gracefully: callers must expect
    /// attempts with unset timestamps or durations, and must not assume
    /// every opened attempt was closed.
    pub fn parse(&self, text: &str) -> Result<Run, LogError> {
        if text.is_empty() {
            return Err(LogError::EmptyLog);
        }

        let mut run = Run::new(text.to_string());
        let mut registry = AttemptRegistry::new();
        let mut cursor: Option<Cursor> = None;

        let mut line_count = 0usize;
        for line in text.lines() {
            line_count += 1;
            match self.markers.classify(line) {
                LineKind::Enter(marker) => {
                    cursor = Some(open_attempt(&mut run, &mut registry, line, &marker));
                }
                LineKind::Exit(marker) => match cursor {
                    Some(at) => close_attempt(attempt_at(&mut run, at), line, &marker),
                    None => warn!(line, "Exit marker with no open attempt, ignoring"),
                },
                LineKind::Failed => match cursor {
                    Some(at) => {
                        let attempt = attempt_at(&mut run, at);
                        debug!(
                            name = %attempt.name,
                            attempt_no = attempt.attempt_no,
                            "Marking attempt failed"
                        );
                        attempt.status = AttemptStatus::Failed;
                    }
                    None => warn!(line, "failure marker with no open attempt, ignoring"),
                },
                LineKind::Plain => {
                    if let Some(at) = cursor {
                        let attempt = attempt_at(&mut run, at);
                        attempt.logs.push(line.to_string());
                        if let Some(mark) = match_phase(line) {
                            record_phase(attempt, mark, line);
                        }
                    }
                }
            }
        }

        if line_count < SHORT_LOG_LINES {
            warn!(
                line_count,
                "log is suspiciously short, the job may have failed before any test ran"
            );
        }

        Ok(run)
    }
}

/// One-shot convenience wrapper around [`LogParser`].
///
/// # Errors
///
/// Same conditions as [`LogParser::parse`].
pub fn parse_log(text: &str, anchor_tag: &str) -> Result<Run, LogError> {
    LogParser::new(anchor_tag)?.parse(text)
}

fn attempt_at(run: &mut Run, at: Cursor) -> &mut Attempt {
    &mut run.test_runs[at.test].attempts[at.attempt]
}

/// Allocate a new attempt for an Enter marker and return a cursor to it.
fn open_attempt(
    run: &mut Run,
    registry: &mut AttemptRegistry,
    line: &str,
    marker: &EnterMarker<'_>,
) -> Cursor {
    let test = registry.test_run_slot(run, marker.full_name, marker.short_name);
    let attempt_no = registry.next_attempt_no(marker.full_name);
    debug!(line, attempt_no, "Found new attempt");

    let mut attempt = Attempt::new(attempt_no, marker.full_name);
    attempt.logs.push(line.to_string());
    match parse_marker_time(marker.timestamp) {
        Ok(start) => attempt.start_time = Some(start),
        Err(error) => warn!(%error, line, "unparsable Enter timestamp, leaving start unset"),
    }

    let test_run = &mut run.test_runs[test];
    test_run.attempts.push(attempt);
    Cursor {
        test,
        attempt: test_run.attempts.len() - 1,
    }
}

/// Record the Exit marker on the current attempt.
fn close_attempt(attempt: &mut Attempt, line: &str, marker: &ExitMarker<'_>) {
    debug!(
        name = marker.full_name,
        attempt_no = attempt.attempt_no,
        "Found end of attempt"
    );
    match parse_marker_time(marker.timestamp) {
        Ok(end) => {
            attempt.end_time = Some(end);
            if let Some(start) = attempt.start_time {
                attempt.duration = Some(end - start);
            }
        }
        Err(error) => warn!(%error, line, "unparsable Exit timestamp, leaving end unset"),
    }
    attempt.logs.push(line.to_string());
}

/// Open or close a nested phase event on the current attempt.
///
/// A start edge always opens a fresh event. An end edge closes the most
/// recent still-open event of the same name; an end with no matching open
/// event is ignored.
fn record_phase(attempt: &mut Attempt, mark: PhaseMark, line: &str) {
    let when = scan_line_time(line);
    if mark.is_start() {
        let mut event = Event::open(mark.event_name(), when);
        event.logs.push(line.to_string());
        attempt.events.push(event);
        return;
    }

    let open = attempt
        .events
        .iter_mut()
        .rev()
        .find(|e| e.name == mark.event_name() && e.end_time.is_none());
    match open {
        Some(event) => {
            event.end_time = when;
            if let (Some(start), Some(end)) = (event.start_time, event.end_time) {
                event.duration = Some(end - start);
            }
            event.status = AttemptStatus::Passed;
            event.logs.push(line.to_string());
        }
        None => debug!(line, "phase completion with no open phase, ignoring"),
    }
}
