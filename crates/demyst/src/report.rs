// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summary and detail rendering
//!
//! Aggregates a parsed [`Run`] into per-test summaries and renders the
//! fixed-width summary table (sorted by average run time) plus an optional
//! per-attempt detail view with backup/restore phase timings.

use chrono::TimeDelta;
use demyst_log::{Run, TestRun};

/// Per-test aggregate for the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSummary {
    /// Short display name of the test
    pub name: String,
    /// Number of attempts (retries included)
    pub attempts: usize,
    /// Number of failed attempts
    pub failed: usize,
    /// Sum of all known attempt durations
    pub total_run_time: TimeDelta,
    /// Attempts that took longer than one second
    pub over_one_second: usize,
    /// Total run time divided by the over-one-second attempt count
    pub average_run_time: TimeDelta,
}

impl TestSummary {
    fn for_test_run(test_run: &TestRun) -> Self {
        let mut total_run_time = TimeDelta::zero();
        let mut over_one_second = 0usize;
        for attempt in &test_run.attempts {
            if let Some(duration) = attempt.duration {
                total_run_time += duration;
                if duration > TimeDelta::seconds(1) {
                    over_one_second += 1;
                }
            }
        }
        // Averaged over the attempts above one second, so a flock of
        // instantly-failing retries does not drown the real run time.
        let average_run_time = if over_one_second > 0 {
            total_run_time / (over_one_second as i32)
        } else {
            TimeDelta::zero()
        };
        Self {
            name: test_run.short_name.clone(),
            attempts: test_run.attempts.len(),
            failed: test_run.failed_attempts(),
            total_run_time,
            over_one_second,
            average_run_time,
        }
    }
}

/// Aggregate every test run into a summary, sorted ascending by average
/// run time.
#[must_use]
pub fn summarize(run: &Run) -> Vec<TestSummary> {
    let mut summaries: Vec<TestSummary> =
        run.test_runs.iter().map(TestSummary::for_test_run).collect();
    summaries.sort_by_key(|s| s.average_run_time);
    summaries
}

/// Render the summary table.
#[must_use]
pub fn render_summary_table(summaries: &[TestSummary]) -> String {
    let rule = "-".repeat(99);
    let mut out = String::from("Test Summary Table:\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "| {:<40} | {:<15} | {:<11} | {:<20} |\n",
        "Test Name", "Num Attempts", "Num Failed", "Average Run Time"
    ));
    out.push_str(&rule);
    out.push('\n');
    for summary in summaries {
        out.push_str(&format!(
            "| {:<40} | {:<15} | {:<11} | {:<20} |\n",
            summary.name,
            summary.attempts,
            summary.failed,
            format_duration(summary.average_run_time)
        ));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

/// Render the per-attempt detail view.
///
/// With `show_timestamps`, raw start/end times of attempts and phases are
/// included. A phase that started but never completed renders `FAILURE`.
#[must_use]
pub fn render_attempt_details(run: &Run, show_timestamps: bool) -> String {
    let mut out = String::new();
    for test_run in &run.test_runs {
        out.push_str(&format!("\n> {}\n", test_run.name));
        for attempt in &test_run.attempts {
            out.push_str(&format!("\tAttempt {}:\n", attempt.attempt_no));
            if show_timestamps {
                if let Some(start) = attempt.start_time {
                    out.push_str(&format!("\t\tStart_Time: {start}\n"));
                }
                if let Some(end) = attempt.end_time {
                    out.push_str(&format!("\t\tEnd_Time: {end}\n"));
                }
            }
            out.push_str(&format!(
                "\t\tAttempt_Time: {}\n",
                format_duration_opt(attempt.duration)
            ));
            for event in &attempt.events {
                let label = capitalize(&event.name);
                if show_timestamps && let Some(start) = event.start_time {
                    out.push_str(&format!("\t\t{label}_Start_Time: {start}\n"));
                }
                match (event.end_time, event.duration) {
                    (Some(end), Some(duration)) => {
                        if show_timestamps {
                            out.push_str(&format!("\t\t{label}_End_Time: {end}\n"));
                        }
                        out.push_str(&format!(
                            "\t\tTotal_{label}_Time: {}\n",
                            format_duration(duration)
                        ));
                    }
                    _ => out.push_str(&format!("\t\t{label}_End_Time: FAILURE\n")),
                }
            }
        }
    }
    out
}

/// Format a duration the way Go's `time.Duration` prints: `5.044s`,
/// `1m20.14s`, `1h0m0s`, with trailing zeros of the fraction trimmed.
/// Sub-second durations render in milliseconds.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let total_ms = duration.num_milliseconds();
    if total_ms == 0 {
        return "0s".to_string();
    }
    let sign = if total_ms < 0 { "-" } else { "" };
    let mut ms = total_ms.unsigned_abs();
    if ms < 1000 {
        return format!("{sign}{ms}ms");
    }

    let hours = ms / 3_600_000;
    ms %= 3_600_000;
    let minutes = ms / 60_000;
    ms %= 60_000;
    let seconds = ms / 1000;
    let fraction = ms % 1000;

    let mut out = String::from(sign);
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 || hours > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if fraction == 0 {
        out.push_str(&format!("{seconds}s"));
    } else {
        let digits = format!("{fraction:03}");
        out.push_str(&format!("{seconds}.{}s", digits.trim_end_matches('0')));
    }
    out
}

/// Like [`format_duration`], rendering `unknown` for an unset duration.
#[must_use]
pub fn format_duration_opt(duration: Option<TimeDelta>) -> String {
    match duration {
        Some(d) => format_duration(d),
        None => "unknown".to_string(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
