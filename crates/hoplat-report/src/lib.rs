//! hoplat-report — analysis driver and report rendering.
//!
//! The driver ([`analyze`]) runs the stage catalogue over each source and
//! produces plain records ([`model`]); the renderers ([`render`]) turn those
//! records into text, CSV or JSON.

pub mod analyze;
pub mod model;
pub mod render;

pub use analyze::{analyze_all, analyze_events, run, RunRequest};
pub use model::RunReport;
pub use render::{render, Format};
