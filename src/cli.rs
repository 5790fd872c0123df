//! CLI argument definitions for the converter.
//!
//! Besides the clap definitions this module turns parsed arguments into the
//! validated inputs of a run. All validation happens here, before any
//! staging directory is created.

use crate::error::{Result, WheelerError};
use crate::extractor::default_innounp_path;
use crate::metadata::PackageDescriptor;
use crate::version::{InstallerName, resolve_version};
use crate::wheel::tags::{TagOverrides, WheelTags};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::LevelFilter;

/// Convert a pysvn Inno Setup installer into a Python wheel.
#[derive(Parser, Debug, Clone)]
#[command(name = "pysvn-wheeler")]
#[command(version, about)]
#[command(long_about = concat!(
    "Convert a pysvn Inno Setup installer into a Python wheel.\n\n",
    "The installer's application directory is unpacked with innounp, staged as ",
    "the `pysvn` module and packed into a platform-specific wheel, which is ",
    "written to the output directory.\n\n",
    "The version is read from the official installer name ",
    "(py<XY>-pysvn-svn<NNNN>-<version>-<build>.exe) unless --pysvn-version is given.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Convert an installer with its original name:\n",
    "    $ pysvn-wheeler py39-pysvn-svn1700-1.10.2-1234.exe\n\n",
    "  Convert a renamed installer:\n",
    "    $ pysvn-wheeler custom-build.exe --pysvn-version 2.0.0\n",
))]
pub struct Cli {
    /// pysvn installer to convert.
    #[arg(value_name = "INSTALLER")]
    pub installer: Utf8PathBuf,

    /// Version number of pysvn [default: taken from the installer name].
    #[arg(long, value_name = "VERSION")]
    pub pysvn_version: Option<String>,

    /// Path to the innounp executable [default: tools/innounp.exe beside this binary].
    #[arg(long, value_name = "PATH")]
    pub innounp: Option<Utf8PathBuf>,

    /// Directory the wheel is written to [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Python tag of the wheel [default: derived from the installer name].
    #[arg(long, value_name = "TAG")]
    pub python_tag: Option<String>,

    /// ABI tag of the wheel [default: derived from the python tag].
    #[arg(long, value_name = "TAG")]
    pub abi_tag: Option<String>,

    /// Platform tag of the wheel [default: win32, or win_amd64 for Win64 installers].
    #[arg(long, value_name = "TAG")]
    pub plat_name: Option<String>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v` / `-q`.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Absolute path of the installer, resolved against `cwd`.
    #[must_use]
    pub fn installer_path(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        cwd.join(&self.installer)
    }

    /// Directory receiving the wheel, resolved against `cwd`.
    #[must_use]
    pub fn output_dir(&self, cwd: &Utf8Path) -> Utf8PathBuf {
        self.output_dir
            .as_ref()
            .map_or_else(|| cwd.to_owned(), |dir| cwd.join(dir))
    }

    /// The unpacker to run.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the default location
    /// cannot be determined.
    pub fn innounp_path(&self) -> Result<Utf8PathBuf> {
        match &self.innounp {
            Some(path) => Ok(path.clone()),
            None => default_innounp_path(),
        }
    }

    /// Tag values given on the command line.
    #[must_use]
    pub fn tag_overrides(&self) -> TagOverrides<'_> {
        TagOverrides {
            python: self.python_tag.as_deref(),
            abi: self.abi_tag.as_deref(),
            platform: self.plat_name.as_deref(),
        }
    }

    /// Validate the inputs and build the package descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::InstallerNotFound`] if the installer is not
    /// an existing file, or a version or tag error if those cannot be
    /// resolved.
    pub fn descriptor(&self, cwd: &Utf8Path) -> Result<PackageDescriptor> {
        let installer = self.installer_path(cwd);
        if !installer.is_file() {
            return Err(WheelerError::InstallerNotFound { path: installer });
        }

        let name = InstallerName::parse(installer.file_name().unwrap_or_default());
        let version = resolve_version(self.pysvn_version.as_deref(), &name)?;
        let tags = WheelTags::resolve(&name, &self.tag_overrides())?;
        log::debug!("resolved version {version} with tags {tags}");

        Ok(PackageDescriptor::pysvn(installer, version, tags))
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
