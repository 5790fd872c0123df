//! Ephemeral staging directory for one build.
//!
//! Layout:
//!
//! ```text
//! <staging root>/
//!     build/lib/<module>/...   extracted payload
//!     dist/<archive>.whl       produced wheel
//! ```
//!
//! The directory is removed when the [`StagingArea`] is dropped, so every
//! exit path (success, error or panic unwinding) cleans up.

use crate::error::{Result, WheelerError};
use crate::wheel::naming::WHEEL_EXTENSION;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Prefix for staging directory names.
const STAGING_PREFIX: &str = "pysvn-wheeler-";

/// An archive found in the staging `dist` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArchive {
    /// File name of the archive.
    pub name: String,
    /// Full path of the archive.
    pub path: Utf8PathBuf,
}

/// Owns the temporary directory holding one build's intermediate files.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    root: Utf8PathBuf,
}

impl StagingArea {
    /// Create a staging area in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not UTF-8.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
        Self::from_temp_dir(dir)
    }

    /// Create a staging area below `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not UTF-8.
    pub fn create_in(parent: &Utf8Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(parent)?;
        Self::from_temp_dir(dir)
    }

    fn from_temp_dir(dir: TempDir) -> Result<Self> {
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf())?;
        log::debug!("created staging directory {root}");
        Ok(Self { dir, root })
    }

    /// Root of the staging directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Library output root; each module gets a subdirectory here.
    #[must_use]
    pub fn build_lib(&self) -> Utf8PathBuf {
        self.root.join("build").join("lib")
    }

    /// Directory receiving the produced archive.
    #[must_use]
    pub fn dist_dir(&self) -> Utf8PathBuf {
        self.root.join("dist")
    }

    /// Locate the single archive in [`Self::dist_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::NoArchiveProduced`] if the directory holds no
    /// archive and [`WheelerError::AmbiguousArchives`] if it holds several.
    pub fn single_archive(&self) -> Result<StagedArchive> {
        let dist = self.dist_dir();
        let mut archives = list_archives(&dist)?;
        match archives.pop() {
            None => Err(WheelerError::NoArchiveProduced { dir: dist }),
            Some(name) if archives.is_empty() => Ok(StagedArchive {
                path: dist.join(&name),
                name,
            }),
            Some(name) => {
                archives.push(name);
                Err(WheelerError::AmbiguousArchives {
                    dir: dist,
                    names: archives,
                })
            }
        }
    }

    /// Delete the staging directory now, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be removed.
    pub fn close(self) -> Result<()> {
        log::debug!("removing staging directory {}", self.root);
        self.dir.close()?;
        Ok(())
    }
}

/// Sorted file names of the archives directly inside `dir`.
fn list_archives(dir: &Utf8Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_file() && entry.file_name().ends_with(WHEEL_EXTENSION) {
            names.push(entry.file_name().to_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;

    #[fixture]
    fn staging() -> StagingArea {
        StagingArea::create().expect("staging area created")
    }

    fn touch(dir: &Utf8Path, name: &str) {
        fs::create_dir_all(dir).expect("mkdir");
        fs::write(dir.join(name), b"").expect("write");
    }

    #[rstest]
    fn layout_lives_under_root(staging: StagingArea) {
        assert!(staging.build_lib().starts_with(staging.root()));
        assert!(staging.build_lib().ends_with("build/lib"));
        assert!(staging.dist_dir().ends_with("dist"));
    }

    #[rstest]
    fn finds_the_only_archive(staging: StagingArea) {
        touch(&staging.dist_dir(), "pysvn-1.10.2-cp39-cp39-win32.whl");
        touch(&staging.dist_dir(), "build.log");

        let archive = staging.single_archive().expect("one archive");
        assert_eq!(archive.name, "pysvn-1.10.2-cp39-cp39-win32.whl");
        assert_eq!(archive.path, staging.dist_dir().join(&archive.name));
    }

    #[rstest]
    fn missing_dist_dir_means_no_archive(staging: StagingArea) {
        let err = staging.single_archive().expect_err("no archive");
        assert!(matches!(err, WheelerError::NoArchiveProduced { .. }));
    }

    #[rstest]
    fn multiple_archives_are_ambiguous(staging: StagingArea) {
        touch(&staging.dist_dir(), "b.whl");
        touch(&staging.dist_dir(), "a.whl");

        let err = staging.single_archive().expect_err("ambiguous");
        match err {
            WheelerError::AmbiguousArchives { names, .. } => assert_eq!(names, ["a.whl", "b.whl"]),
            other => panic!("expected AmbiguousArchives, got {other:?}"),
        }
    }

    #[test]
    fn dropping_removes_directory() {
        let staging = StagingArea::create().expect("staging area created");
        let root = staging.root().to_owned();
        touch(&staging.build_lib().join("pysvn"), "__init__.py");
        drop(staging);
        assert!(!root.exists());
    }

    #[test]
    fn close_removes_directory() {
        let staging = StagingArea::create().expect("staging area created");
        let root = staging.root().to_owned();
        staging.close().expect("close succeeds");
        assert!(!root.exists());
    }
}
