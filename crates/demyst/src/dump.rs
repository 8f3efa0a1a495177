// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-attempt log dumping
//!
//! Writes each attempt's log buffer to `<folder>/<name>.log` (slashes in
//! the name replaced with underscores), every line prefixed with the given
//! prefixes. The CLI uses the attempt name and a literal `": "` so dumped
//! lines stay attributable when files are concatenated or grepped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use demyst_log::{Attempt, Run};
use tracing::debug;

/// Dump every attempt of the run into `folder`, creating it if needed.
///
/// Retries share the test name and therefore the file name: the last
/// attempt written wins.
///
/// # Errors
///
/// Returns the underlying `io::Error` when the folder cannot be created
/// or a file cannot be written.
pub fn dump_attempts(run: &Run, folder: &Path) -> io::Result<()> {
    fs::create_dir_all(folder)?;
    for test_run in &run.test_runs {
        for attempt in &test_run.attempts {
            let path = dump_attempt(attempt, folder, &[&attempt.name, ": "])?;
            debug!(path = %path.display(), attempt_no = attempt.attempt_no, "Dumped attempt log");
        }
    }
    Ok(())
}

/// Write one attempt's log buffer, each line prefixed with `prefixes` in
/// order. Returns the path written.
///
/// # Errors
///
/// Returns the underlying `io::Error` on write failure.
pub fn dump_attempt(attempt: &Attempt, folder: &Path, prefixes: &[&str]) -> io::Result<PathBuf> {
    let file_name = format!("{}.log", attempt.name.replace('/', "_"));
    let path = folder.join(file_name);

    let mut contents = String::new();
    for line in &attempt.logs {
        for prefix in prefixes {
            contents.push_str(prefix);
        }
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(&path, contents)?;
    Ok(path)
}
