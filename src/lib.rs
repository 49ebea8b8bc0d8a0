//! hoplat — per-stage latency statistics from device instrumentation logs.
//!
//! This crate wires the command line onto the library crates so integration
//! tests can drive a full run without spawning the binary.
//!
//! # Architecture
//!
//! ```text
//! hoplat-sources ──► hoplat-core ──► hoplat-report
//!  (resolve, load)   (parse, correlate,  (driver, text/CSV/JSON)
//!                     stats, role)
//! ```

pub mod cli;

pub use cli::{execute, execute_with, Cli};
