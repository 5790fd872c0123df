//! Error types for wheel packaging.
//!
//! Covers I/O failures, archive writer failures and payload problems that
//! can occur while assembling a `.whl` file.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from wheel packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// An I/O operation failed (reading payload files, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// The zip writer rejected an entry or failed to finalise the archive.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walking the payload tree failed.
    #[error("failed to walk payload directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The extraction step left no files to package.
    #[error("no payload files found under {dir}")]
    EmptyPayload {
        /// The build directory that was scanned.
        dir: Utf8PathBuf,
    },

    /// A payload path cannot be stored in the archive.
    #[error("payload path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
}
