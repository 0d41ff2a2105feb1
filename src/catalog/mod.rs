//! Catalog entities and track collection.
//!
//! # Overview
//!
//! - [`track`] - [`PendingTrack`] and the resolved, immutable [`Track`]
//! - [`album`] - [`Album`], resolved from its page plus every listed track
//! - [`collector`] - Track listing table parsing ([`collect_tracks`])
//! - [`naming`] - Title composition and path-safe output names
//!
//! Entities are owned by whoever resolves them and handed on by value; none
//! is mutated after resolution.

pub mod album;
pub mod collector;
pub mod naming;
pub mod track;

pub use album::{Album, TrackFailure};
pub use collector::{base_url, collect_tracks};
pub use naming::{album_directory_name, audio_file_name, cover_file_name, format_title};
pub use track::{PendingTrack, Track};
