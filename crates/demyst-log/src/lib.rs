// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! demyst-log: Ginkgo e2e build-log parsing for demyst
//!
//! This library crate reconstructs structured test-execution data from the
//! semi-structured build logs that Ginkgo-instrumented e2e suites emit:
//! paired `> Enter [It]` / `< Exit [It]` markers around named test events,
//! `[FAILED]` markers, and free-form log lines in between. Repeated attempts
//! of the same test (retries) are disambiguated by a per-name attempt
//! counter.
//!
//! # Example
//!
//! ```
//! use demyst_log::LogParser;
//!
//! let text = "\
//! > Enter [It] CaseA - CaseA Full @ 01/02/24 10:00:00.000
//! some log line
//! < Exit [It] CaseA Full - path @ 01/02/24 10:00:05.000 (5s)
//! ";
//! let parser = LogParser::new("It").unwrap();
//! let run = parser.parse(text).unwrap();
//! assert_eq!(run.test_runs[0].attempts.len(), 1);
//! ```

pub mod error;
pub mod marker;
pub mod model;
pub mod parser;
pub mod registry;
pub mod timestamp;

pub use error::LogError;
pub use marker::{EnterMarker, ExitMarker, LineKind, MarkerSet, PhaseMark};
pub use model::{Attempt, AttemptStatus, Event, Run, TestRun};
pub use parser::{LogParser, parse_log};
pub use registry::AttemptRegistry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::model::{Attempt, AttemptStatus, Event, Run, TestRun};
    pub use crate::parser::{LogParser, parse_log};
}
