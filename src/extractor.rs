//! Installer payload extraction.
//!
//! The converter never parses Inno Setup archives itself. It hands the
//! installer to `innounp`, asking for the `{app}` subtree only, and treats
//! any non-zero exit as fatal.

use crate::error::{Result, WheelerError};
use crate::process::{CommandExecutor, SystemCommandExecutor, combined_output};
use camino::{Utf8Path, Utf8PathBuf};

/// Location of the unpacker relative to the directory holding the binary.
const DEFAULT_INNOUNP: &str = "tools/innounp.exe";

/// Extracts an installer's application payload into a directory.
#[cfg_attr(test, mockall::automock)]
pub trait InstallerExtractor {
    /// Extract the installed-application subtree of `installer` into
    /// `destination`.
    ///
    /// Existing content in `destination` is left in place; callers pass a
    /// fresh directory.
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::InstallerNotAFile`] if `installer` is not a
    /// regular file, or an extraction error if the payload cannot be
    /// unpacked.
    fn extract(&self, installer: &Utf8Path, destination: &Utf8Path) -> Result<()>;
}

/// [`InstallerExtractor`] backed by the `innounp` command-line unpacker.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use pysvn_wheeler::extractor::{InnounpExtractor, InstallerExtractor};
///
/// let extractor = InnounpExtractor::new("tools/innounp.exe".into());
/// extractor.extract(
///     Utf8Path::new("py39-pysvn-svn1700-1.10.2-1234.exe"),
///     Utf8Path::new("build/lib/pysvn"),
/// )?;
/// # Ok::<(), pysvn_wheeler::error::WheelerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InnounpExtractor<E = SystemCommandExecutor> {
    executable: Utf8PathBuf,
    executor: E,
}

impl InnounpExtractor {
    /// Create an extractor that runs `executable` on the host system.
    #[must_use]
    pub fn new(executable: Utf8PathBuf) -> Self {
        Self::with_executor(executable, SystemCommandExecutor)
    }
}

impl<E: CommandExecutor> InnounpExtractor<E> {
    /// Create an extractor that runs commands through `executor`.
    #[must_use]
    pub fn with_executor(executable: Utf8PathBuf, executor: E) -> Self {
        Self {
            executable,
            executor,
        }
    }

    /// Path of the unpacker executable.
    #[must_use]
    pub fn executable(&self) -> &Utf8Path {
        &self.executable
    }
}

impl<E: CommandExecutor> InstallerExtractor for InnounpExtractor<E> {
    fn extract(&self, installer: &Utf8Path, destination: &Utf8Path) -> Result<()> {
        if !installer.is_file() {
            return Err(WheelerError::InstallerNotAFile {
                path: installer.to_owned(),
            });
        }

        let args = innounp_arguments(installer, destination);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        log::debug!("extracting {installer} into {destination}");

        let output = self
            .executor
            .run(self.executable.as_str(), &arg_refs)
            .map_err(|source| WheelerError::ExtractorUnavailable {
                executable: self.executable.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(WheelerError::ExtractionFailed {
                output: combined_output(&output),
            });
        }

        log::trace!("innounp output:\n{}", combined_output(&output));
        Ok(())
    }
}

/// Build the `innounp` argument list.
///
/// `-x` extracts everything, `-y` answers prompts, `-c{app}` limits output
/// to the installed-application subtree and `-d` names the destination.
#[must_use]
pub fn innounp_arguments(installer: &Utf8Path, destination: &Utf8Path) -> Vec<String> {
    vec![
        "-x".to_owned(),
        "-y".to_owned(),
        "-c{app}".to_owned(),
        format!("-d{destination}"),
        installer.as_str().to_owned(),
    ]
}

/// Return the default unpacker location: `tools/innounp.exe` next to the
/// running binary.
///
/// # Errors
///
/// Returns an I/O error if the current executable cannot be located, or
/// [`WheelerError::NonUtf8Path`] if its path is not UTF-8.
pub fn default_innounp_path() -> Result<Utf8PathBuf> {
    let exe = Utf8PathBuf::try_from(std::env::current_exe()?)?;
    let dir = exe.parent().map_or_else(Utf8PathBuf::new, Utf8Path::to_owned);
    Ok(dir.join(DEFAULT_INNOUNP))
}
