// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line configuration for demyst

use std::path::PathBuf;

use clap::Parser;

/// Demystify Ginkgo e2e build logs: attempts, retries, timings
#[derive(Parser, Debug, Clone)]
#[command(name = "demyst")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Build log to demystify
    ///
    /// A local file path, a direct URL to a build-log.txt, or a Prow CI
    /// job URL (the canonical build-log URL is derived automatically).
    pub log: String,

    /// Anchor tag identifying the Enter/Exit markers of interest
    #[arg(long, env = "DEMYST_TAG", default_value = "It")]
    pub tag: String,

    /// Show passing attempts too, not only failed ones
    #[arg(short = 's', long, default_value = "false")]
    pub show_passing: bool,

    /// Print the per-attempt detail view after the summary table
    #[arg(long, default_value = "false")]
    pub details: bool,

    /// Include raw start/end timestamps in the detail view
    ///
    /// Implies --details.
    #[arg(short = 't', long, default_value = "false")]
    pub timestamps: bool,

    /// Dump each attempt's log buffer to a file in this folder and exit
    #[arg(short = 'f', long)]
    pub dump_folder: Option<PathBuf>,

    /// Emit the parsed run as JSON instead of the summary table
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the rendered
    /// tables or JSON on stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Log level implied by the verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
