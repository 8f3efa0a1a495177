// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Build-log acquisition
//!
//! Fetches log text from a local file or an HTTP(S) endpoint, and derives
//! the canonical `build-log.txt` URL from a Prow CI job URL. The parsing
//! core never performs I/O itself; it receives the text loaded here.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Prow job URLs start with this prefix; the remainder is the GCS path.
const PROW_VIEW_PREFIX: &str = "https://prow.ci.openshift.org/view/gs/";

/// GCS web frontend serving the job artifacts.
const GCSWEB_PREFIX: &str = "https://gcsweb-ci.apps.ci.l2s4.p1.openshiftapps.com/gcs";

/// CI logs routinely run to tens of megabytes.
const MAX_LOG_BYTES: u64 = 256 * 1024 * 1024;

/// Errors that can occur while acquiring log text
#[derive(Debug, Error)]
pub enum FetchError {
    /// Error reading a local log file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error fetching a remote log
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// The job URL is not a recognized Prow view URL
    #[error("unrecognized CI job URL: {url}")]
    UnrecognizedJobUrl {
        /// The URL that could not be interpreted
        url: String,
    },
}

/// Load log text from `location`: an `http://`/`https://` URL or a local
/// file path. Line endings are normalized to `\n` and a trailing newline
/// is ensured.
///
/// # Errors
///
/// Returns `FetchError::Http` for request failures and `FetchError::Io`
/// for file read failures.
pub fn load_log(location: &str) -> Result<String, FetchError> {
    let raw = if location.starts_with("http://") || location.starts_with("https://") {
        debug!(location, "Using log from URL");
        let mut response = ureq::get(location).call()?;
        response
            .body_mut()
            .with_config()
            .limit(MAX_LOG_BYTES)
            .read_to_string()?
    } else {
        debug!(location, "Using log from file");
        std::fs::read_to_string(location)?
    };

    let mut text = String::with_capacity(raw.len() + 1);
    for line in raw.lines() {
        text.push_str(line);
        text.push('\n');
    }
    Ok(text)
}

static E2E_TEST_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"e2e-test-(.*?)/").expect("static pattern"));

/// Derive the canonical build-log URL from a Prow CI job URL.
///
/// A URL already pointing at `build-log.txt` passes through unchanged.
/// Otherwise the GCS path is lifted from the Prow view URL and combined
/// with the job's `e2e-test-<type>/` segment into the gcsweb artifact URL.
///
/// # Errors
///
/// Returns `FetchError::UnrecognizedJobUrl` when the URL is neither a
/// build-log URL nor a Prow view URL.
pub fn build_log_url(job_url: &str) -> Result<String, FetchError> {
    if job_url.ends_with("/build-log.txt") {
        return Ok(job_url.to_string());
    }
    let Some(gcs_path) = job_url.strip_prefix(PROW_VIEW_PREFIX) else {
        return Err(FetchError::UnrecognizedJobUrl {
            url: job_url.to_string(),
        });
    };
    let test_type = E2E_TEST_TYPE
        .find(job_url)
        .map(|m| m.as_str())
        .unwrap_or_default();
    Ok(format!(
        "{GCSWEB_PREFIX}/{gcs_path}/artifacts/{test_type}e2e/build-log.txt"
    ))
}
