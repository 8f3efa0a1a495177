// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! demyst: demystify Ginkgo e2e build logs
//!
//! This binary fetches a CI build log (local file, direct URL, or Prow job
//! URL), reconstructs per-test attempts with the demyst-log parsing core,
//! and reports them: failed-attempt logging, a summary table sorted by
//! average run time, an optional per-attempt detail view, per-attempt log
//! dumps, or JSON.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use demyst::config::Config;
use demyst::{dump, fetch, report};
use demyst_log::LogParser;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays clean for tables and JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        start_timestamp = chrono::Utc::now().timestamp(),
        "demyst starts its journey"
    );

    let location = if config.log.starts_with("http://") || config.log.starts_with("https://") {
        fetch::build_log_url(&config.log)?
    } else {
        config.log.clone()
    };
    info!(%location, "Using log from");

    let text = fetch::load_log(&location)
        .with_context(|| format!("failed to load log from {location}"))?;
    let parser = LogParser::new(&config.tag)
        .with_context(|| format!("invalid anchor tag {:?}", config.tag))?;
    let run = parser
        .parse(&text)
        .context("failed to parse build log")?;

    for test_run in &run.test_runs {
        let mut failed_attempts = 0usize;
        for attempt in &test_run.attempts {
            if attempt.failed() {
                failed_attempts += 1;
                error!(
                    name = %test_run.short_name,
                    no = attempt.attempt_no,
                    time = %report::format_duration_opt(attempt.duration),
                    "Failed attempt run"
                );
            } else if config.show_passing {
                info!(
                    name = %test_run.short_name,
                    no = attempt.attempt_no,
                    time = %report::format_duration_opt(attempt.duration),
                    "Pass attempt run"
                );
            }
        }
        if failed_attempts > 0 {
            info!(name = %test_run.name, failed = failed_attempts, "Test summary");
        }
    }

    if let Some(folder) = &config.dump_folder {
        dump::dump_attempts(&run, folder)
            .with_context(|| format!("failed to dump logs to {}", folder.display()))?;
        return Ok(());
    }

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&run).context("failed to serialize run")?
        );
    } else {
        print!("{}", report::render_summary_table(&report::summarize(&run)));
        if config.details || config.timestamps {
            print!("{}", report::render_attempt_details(&run, config.timestamps));
        }
    }

    info!(
        end_timestamp = chrono::Utc::now().timestamp(),
        "demyst finishes its journey"
    );
    Ok(())
}
