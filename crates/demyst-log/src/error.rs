// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for demyst-log

use thiserror::Error;

/// Errors that can occur during build-log processing
#[derive(Debug, Error)]
pub enum LogError {
    /// The supplied log text was empty
    #[error("log text is empty, nothing to parse")]
    EmptyLog,

    /// A marker timestamp matched none of the known formats
    ///
    /// Recovered locally during parsing: the affected time field is left
    /// unset and parsing continues.
    #[error("timestamp {text:?} matches no known format")]
    Timestamp {
        /// The raw timestamp text that failed to parse
        text: String,
    },

    /// A marker pattern failed to compile
    #[error("marker pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
