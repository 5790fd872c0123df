//! Error types for the pysvn wheel converter.
//!
//! Variants are split into input errors, which are detected before anything
//! touches the filesystem, and build errors raised while extracting or
//! packaging. The binary maps the two groups to different exit codes.

use crate::wheel::error::PackagingError;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting an installer into a wheel.
#[derive(Debug, Error)]
pub enum WheelerError {
    /// The installer path given on the command line does not exist.
    #[error("{path} not found")]
    InstallerNotFound {
        /// Absolute path that was checked.
        path: Utf8PathBuf,
    },

    /// No explicit version was given and the file name carries none.
    #[error(
        "failed to extract version from pysvn installer name {file_name}\n\
         Either give version via --pysvn-version or keep original installer name"
    )]
    VersionUnresolvable {
        /// File name that did not match the installer naming pattern.
        file_name: String,
    },

    /// The resolved version is not a strict `major.minor.patch` version.
    #[error("invalid version number '{value}': {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A wheel compatibility tag contains characters the format forbids.
    #[error("invalid {kind} tag '{value}'")]
    InvalidTag {
        /// Which tag was rejected (python, abi or platform).
        kind: &'static str,
        /// The rejected tag value.
        value: String,
    },

    /// The extractor was handed a path that is not a regular file.
    #[error("passed setup path {path} isn't a valid file")]
    InstallerNotAFile {
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// The external unpacking tool could not be started.
    #[error("failed to run unpacker {executable}: {source}")]
    ExtractorUnavailable {
        /// Path of the unpacker executable.
        executable: Utf8PathBuf,
        /// Spawn failure reported by the operating system.
        #[source]
        source: std::io::Error,
    },

    /// The external unpacking tool exited unsuccessfully.
    #[error("setup file couldn't be extracted.\n{output}")]
    ExtractionFailed {
        /// Combined stdout and stderr of the unpacker.
        output: String,
    },

    /// Writing the wheel archive failed.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// The build step finished without leaving an archive behind.
    #[error("no wheel archive found in {dir}")]
    NoArchiveProduced {
        /// Directory that was searched.
        dir: Utf8PathBuf,
    },

    /// The build step left more than one archive behind.
    #[error("expected exactly one wheel archive in {dir}, found: {}", names.join(", "))]
    AmbiguousArchives {
        /// Directory that was searched.
        dir: Utf8PathBuf,
        /// File names of every archive found.
        names: Vec<String>,
    },

    /// A filesystem path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WheelerError {
    /// Returns `true` for errors caused by invalid command-line input.
    ///
    /// Input errors are raised before any staging directory exists.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InstallerNotFound { .. }
                | Self::VersionUnresolvable { .. }
                | Self::InvalidVersion { .. }
                | Self::InvalidTag { .. }
        )
    }
}

impl From<camino::FromPathBufError> for WheelerError {
    fn from(err: camino::FromPathBufError) -> Self {
        Self::NonUtf8Path {
            path: err.into_path_buf(),
        }
    }
}

/// Result type alias using [`WheelerError`].
pub type Result<T> = std::result::Result<T, WheelerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn version_unresolvable_names_both_remedies() {
        let err = WheelerError::VersionUnresolvable {
            file_name: "custom-build.exe".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("--pysvn-version"));
        assert!(msg.contains("keep original installer name"));
        assert!(msg.contains("custom-build.exe"));
    }

    #[test]
    fn extraction_failed_includes_tool_output() {
        let err = WheelerError::ExtractionFailed {
            output: "Not an Inno Setup installer".to_owned(),
        };
        assert!(err.to_string().contains("Not an Inno Setup installer"));
    }

    #[test]
    fn ambiguous_archives_lists_every_name() {
        let err = WheelerError::AmbiguousArchives {
            dir: Utf8PathBuf::from("/tmp/dist"),
            names: vec!["a.whl".to_owned(), "b.whl".to_owned()],
        };
        let msg = err.to_string();
        assert!(msg.contains("a.whl, b.whl"));
    }

    #[test]
    fn extractor_unavailable_preserves_source() {
        let err = WheelerError::ExtractorUnavailable {
            executable: Utf8PathBuf::from("tools/innounp.exe"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("tools/innounp.exe"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[rstest]
    #[case::not_found(WheelerError::InstallerNotFound { path: Utf8PathBuf::from("x.exe") }, true)]
    #[case::unresolvable(WheelerError::VersionUnresolvable { file_name: "x.exe".to_owned() }, true)]
    #[case::invalid(
        WheelerError::InvalidVersion { value: "1.2".to_owned(), reason: "short".to_owned() },
        true
    )]
    #[case::extraction(WheelerError::ExtractionFailed { output: String::new() }, false)]
    #[case::no_archive(WheelerError::NoArchiveProduced { dir: Utf8PathBuf::from("dist") }, false)]
    fn classifies_input_errors(#[case] err: WheelerError, #[case] expected: bool) {
        assert_eq!(err.is_input_error(), expected);
    }
}
