//! hoplat-sources — log source adapters for hoplat.
//!
//! [`discover::resolve_inputs`] turns command-line paths into an ordered,
//! de-duplicated list of files; [`load::load_source`] reads one file and
//! parses it into events. Each file is an independent log source.

pub mod discover;
pub mod error;
pub mod load;

pub use discover::{resolve_inputs, Resolved};
pub use error::{Error, Result};
pub use load::{load_source, LogSource};
