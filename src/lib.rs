//! pysvn wheel converter library.
//!
//! This crate turns a pysvn Windows installer (an Inno Setup executable) into
//! a binary Python wheel. It is used by the `pysvn-wheeler` CLI binary and can
//! be driven programmatically, for example with a different extractor.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions and input validation
//! - [`driver`] - Build orchestration from installer to copied archive
//! - [`error`] - Semantic error types
//! - [`extractor`] - Installer unpacking through innounp
//! - [`metadata`] - Package metadata and module layout for pysvn
//! - [`output`] - User-facing result messages
//! - [`process`] - External command execution abstraction
//! - [`staging`] - Ephemeral build directory management
//! - [`version`] - Installer name parsing and version resolution
//! - [`wheel`] - Wheel naming, tags and archive writing

pub mod cli;
pub mod driver;
pub mod error;
pub mod extractor;
pub mod metadata;
pub mod output;
pub mod process;
pub mod staging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod version;
pub mod wheel;
