//! Build orchestration.
//!
//! A run moves through: staging created, payload extracted into
//! `build/lib/<module>`, wheel written into `dist`, the single archive
//! copied to the caller's output directory, staging removed. Any error
//! aborts the run; the staging directory is removed on every path because it
//! is owned by a [`StagingArea`] value.
//!
//! The process working directory is never changed. The output directory is
//! an explicit parameter.

use crate::error::Result;
use crate::extractor::InstallerExtractor;
use crate::metadata::PackageDescriptor;
use crate::staging::{StagedArchive, StagingArea};
use crate::wheel::writer::{WheelParams, write_wheel};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// File name of the produced archive.
    pub archive_name: String,
    /// Where the archive was copied to.
    pub archive_path: Utf8PathBuf,
}

/// Drives one conversion from installer to wheel.
pub struct PackagingDriver<'a> {
    extractor: &'a dyn InstallerExtractor,
    staging_parent: Option<Utf8PathBuf>,
}

impl<'a> PackagingDriver<'a> {
    /// Create a driver that extracts payloads with `extractor`.
    #[must_use]
    pub fn new(extractor: &'a dyn InstallerExtractor) -> Self {
        Self {
            extractor,
            staging_parent: None,
        }
    }

    /// Create staging directories below `parent` instead of the system
    /// temporary directory.
    #[must_use]
    pub fn with_staging_parent(mut self, parent: Utf8PathBuf) -> Self {
        self.staging_parent = Some(parent);
        self
    }

    /// Build the wheel described by `descriptor` and copy it into
    /// `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns the first extraction, packaging, archive selection or copy
    /// error. No archive is left in `output_dir` on failure.
    pub fn run(
        &self,
        descriptor: &PackageDescriptor,
        output_dir: &Utf8Path,
    ) -> Result<BuildOutcome> {
        log::info!(
            "converting {} into {} {}",
            descriptor.module.installer,
            descriptor.metadata.name,
            descriptor.metadata.version
        );

        let staging = self.create_staging()?;
        self.build(&staging, descriptor)?;

        let archive = staging.single_archive()?;
        log::debug!("archive produced: {}", archive.path);

        let outcome = copy_archive(&archive, output_dir)?;
        log::debug!("archive copied to {}", outcome.archive_path);

        if let Err(err) = staging.close() {
            log::warn!("failed to remove staging directory: {err}");
        }

        log::info!("wrote {}", outcome.archive_path);
        Ok(outcome)
    }

    fn create_staging(&self) -> Result<StagingArea> {
        match &self.staging_parent {
            Some(parent) => StagingArea::create_in(parent),
            None => StagingArea::create(),
        }
    }

    /// Extract the module payload and write the wheel inside `staging`.
    fn build(&self, staging: &StagingArea, descriptor: &PackageDescriptor) -> Result<()> {
        let build_lib = staging.build_lib();
        let payload_dir = descriptor.module.payload_dir(&build_lib);
        fs::create_dir_all(&payload_dir)?;

        log::debug!("extracting payload into {payload_dir}");
        self.extractor
            .extract(&descriptor.module.installer, &payload_dir)?;

        let dist_dir = staging.dist_dir();
        let params = WheelParams {
            metadata: &descriptor.metadata,
            module: &descriptor.module.module,
            tags: &descriptor.tags,
            build_lib: &build_lib,
            dist_dir: &dist_dir,
        };
        write_wheel(&params)?;
        Ok(())
    }
}

/// Copy `archive` into `output_dir`, keeping its file name.
///
/// The bytes go to a temporary file inside `output_dir` that is renamed into
/// place once complete; on failure the temporary file is removed.
fn copy_archive(archive: &StagedArchive, output_dir: &Utf8Path) -> Result<BuildOutcome> {
    let archive_path = output_dir.join(&archive.name);
    let mut partial = tempfile::Builder::new()
        .prefix(".pysvn-wheeler-")
        .suffix(".part")
        .tempfile_in(output_dir)?;
    io::copy(&mut fs::File::open(&archive.path)?, partial.as_file_mut())?;
    partial.persist(&archive_path).map_err(|err| err.error)?;
    Ok(BuildOutcome {
        archive_name: archive.name.clone(),
        archive_path,
    })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
