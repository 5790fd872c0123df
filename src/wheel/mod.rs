//! Wheel packaging.
//!
//! A minimal writer for platform-specific wheels: naming, compatibility
//! tags, the `RECORD` manifest and the archive itself.
//!
//! # Sub-modules
//!
//! - [`error`] - Error types for packaging failures.
//! - [`naming`] - Wheel file naming (`WheelName`).
//! - [`record`] - `RECORD` entries and rendering.
//! - [`tags`] - Compatibility tag resolution (`WheelTags`).
//! - [`writer`] - Archive creation.

pub mod error;
pub mod naming;
pub mod record;
pub mod tags;
pub mod writer;
