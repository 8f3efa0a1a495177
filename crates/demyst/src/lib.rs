//! demyst library
//!
//! This module exports the CLI collaborators around the demyst-log parsing
//! core for use in integration tests and as a library: log acquisition,
//! summary reporting, and per-attempt log dumping.

pub mod config;
pub mod dump;
pub mod fetch;
pub mod report;
