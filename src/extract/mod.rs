//! Metadata extraction.
//!
//! Metadata is sliced out of raw markup with an ordered set of declarative
//! [`Rule`]s rather than a DOM parser, which keeps the tolerance for
//! minimally-structured pages and makes every fallback explicit.
//!
//! # Overview
//!
//! - [`rule`] - The [`Rule`]/[`Slice`] primitives and the catalog's field rules
//! - [`metadata`] - [`extract`], producing a [`Metadata`] record for a page

pub mod metadata;
pub mod rule;

pub use metadata::{extract, parse_track_info, Metadata};
pub use rule::{Rule, Slice};
