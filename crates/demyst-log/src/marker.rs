// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Marker line classification
//!
//! Three line classes delimit attempts in a Ginkgo build log, anchored on a
//! configurable tag (usually `It`):
//!
//! - Enter: `> Enter [It] <shortName> - <fullName> @ <timestamp>`
//! - Exit: `< Exit [It] <fullName> - <anything> @ <timestamp> (<duration>)`
//! - Failure: optional leading whitespace then `[FAILED]`
//!
//! Classification checks the patterns in that fixed priority order; the
//! first match wins and a line matching none is plain. Patterns are
//! compiled once per [`MarkerSet`] and reused across all lines of a parse.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LogError;

/// Captures from an Enter marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterMarker<'a> {
    /// Display label for the test
    pub short_name: &'a str,
    /// Full test name, unique per test
    pub full_name: &'a str,
    /// Raw timestamp text, not yet normalized
    pub timestamp: &'a str,
}

/// Captures from an Exit marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitMarker<'a> {
    /// Full test name
    pub full_name: &'a str,
    /// Raw timestamp text, not yet normalized
    pub timestamp: &'a str,
}

/// Classification of a single log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Start of an attempt
    Enter(EnterMarker<'a>),
    /// End of an attempt
    Exit(ExitMarker<'a>),
    /// Failure of the currently open attempt
    Failed,
    /// Ordinary log output
    Plain,
}

/// Compiled marker patterns for one anchor tag
#[derive(Debug)]
pub struct MarkerSet {
    enter: Regex,
    exit: Regex,
    failed: Regex,
}

impl MarkerSet {
    /// Compile the Enter/Exit/Failure patterns for the given anchor tag.
    ///
    /// The tag text is escaped, so tags containing regex metacharacters
    /// are matched literally.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Pattern` if a pattern fails to compile.
    pub fn new(anchor_tag: &str) -> Result<Self, LogError> {
        let tag = regex::escape(anchor_tag);
        Ok(Self {
            enter: Regex::new(&format!(r"> Enter \[{tag}\] (.+) - (.+) @ (.+)"))?,
            exit: Regex::new(&format!(r"< Exit \[{tag}\] (.+?) - .+ @ (.+) \(.+\)"))?,
            failed: Regex::new(r"^[\t ]*\[FAILED\]")?,
        })
    }

    /// Classify a line as exactly one of Enter, Exit, Failed, or Plain.
    #[must_use]
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(captures) = self.enter.captures(line) {
            // Groups are present whenever the pattern matches.
            let (_, [short_name, full_name, timestamp]) = captures.extract();
            return LineKind::Enter(EnterMarker {
                short_name,
                full_name,
                timestamp,
            });
        }
        if let Some(captures) = self.exit.captures(line) {
            let (_, [full_name, timestamp]) = captures.extract();
            return LineKind::Exit(ExitMarker {
                full_name,
                timestamp,
            });
        }
        if self.failed.is_match(line) {
            return LineKind::Failed;
        }
        LineKind::Plain
    }
}

// ============================================================================
// Phase markers (nested backup/restore events)
// ============================================================================

/// Phase edge recognized inside an open attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseMark {
    /// A backup is being created
    BackupStart,
    /// The backup completed successfully
    BackupEnd,
    /// A restore is being created
    RestoreStart,
    /// Post-restore state verification passed
    RestoreEnd,
}

impl PhaseMark {
    /// Name of the event this edge belongs to
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::BackupStart | Self::BackupEnd => "backup",
            Self::RestoreStart | Self::RestoreEnd => "restore",
        }
    }

    /// Whether this edge opens the event
    #[must_use]
    pub fn is_start(self) -> bool {
        matches!(self, Self::BackupStart | Self::RestoreStart)
    }
}

/// Phase patterns are tag-independent: a timestamp followed by a known
/// progress message. Checked in order, first match wins.
static PHASE_PATTERNS: LazyLock<Vec<(Regex, PhaseMark)>> = LazyLock::new(|| {
    const TIME: &str = r"\d{2}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}";
    [
        (format!("{TIME}.*Creating backup"), PhaseMark::BackupStart),
        (
            format!("{TIME}.*Backup for case .+ succeeded"),
            PhaseMark::BackupEnd,
        ),
        (format!("{TIME}.*Creating restore"), PhaseMark::RestoreStart),
        (
            format!("{TIME}.*Post backup and restore state:  passed"),
            PhaseMark::RestoreEnd,
        ),
    ]
    .iter()
    .map(|(pattern, mark)| (Regex::new(pattern).expect("static phase pattern"), *mark))
    .collect()
});

/// Recognize a backup/restore phase edge in a plain log line.
#[must_use]
pub fn match_phase(line: &str) -> Option<PhaseMark> {
    PHASE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(line))
        .map(|(_, mark)| *mark)
}
