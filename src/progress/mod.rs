//! Progress module containing progress bar functionality.
//!
//! The transfer engine only emits [`Progress`](crate::download::Progress)
//! counters; this module is the presentation layer that renders them.
//!
//! # Overview
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar display management and coordination

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
