//! Error types for hoplat-core.
//!
//! Only configuration problems are errors here. Noise lines, missing
//! correlation fields and negative deltas are expected input and are handled
//! locally by the parser and correlator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("role marker {kind:?} appears in both the {first} and {second} sets")]
    OverlappingMarkers {
        kind: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("stage {name:?} has a key rule with no fields")]
    EmptyKeyRule { name: String },

    #[error("duplicate stage name {0:?}")]
    DuplicateStage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
