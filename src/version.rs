//! Version resolution for pysvn installers.
//!
//! Official pysvn installers are named
//! `py<XY>-pysvn-svn<NNNN>-<major.minor.patch>-<build>[-<suffix>].exe`. The
//! dotted version is lifted from that name unless the caller supplies one
//! explicitly, and either way must be a strict three-component version.

use crate::error::{Result, WheelerError};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static INSTALLER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"py(?P<python>\d{2})-pysvn-svn\d{3,4}-(?P<version>\d+\.\d+\.\d+)-\d{4}.*\.exe$",
    )
    .expect("installer name pattern compiles")
});

/// Facts recovered from an installer's file name.
///
/// # Examples
///
/// ```
/// use pysvn_wheeler::version::InstallerName;
///
/// let name = InstallerName::parse("py39-pysvn-svn1700-1.10.2-1234-Win64.exe");
/// assert_eq!(name.version(), Some("1.10.2"));
/// assert_eq!(name.python_digits(), Some("39"));
/// assert!(name.is_win64());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerName {
    file_name: String,
    python: Option<String>,
    version: Option<String>,
    win64: bool,
}

impl InstallerName {
    /// Parse an installer file name. Names that do not follow the official
    /// pattern parse successfully but carry no version or python digits.
    #[must_use]
    pub fn parse(file_name: &str) -> Self {
        let captures = INSTALLER_NAME.captures(file_name);
        let group = |name: &str| {
            captures
                .as_ref()
                .and_then(|c| c.name(name))
                .map(|m| m.as_str().to_owned())
        };
        Self {
            file_name: file_name.to_owned(),
            python: group("python"),
            version: group("version"),
            win64: file_name.to_ascii_lowercase().contains("win64"),
        }
    }

    /// The file name this value was parsed from.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The dotted version embedded in the name, if it follows the pattern.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The two python version digits (`39` for `py39`), if present.
    #[must_use]
    pub fn python_digits(&self) -> Option<&str> {
        self.python.as_deref()
    }

    /// Whether the installer targets 64-bit Windows.
    #[must_use]
    pub fn is_win64(&self) -> bool {
        self.win64
    }
}

/// A strict `major.minor.patch` version.
///
/// Pre-release and build-metadata suffixes are rejected, as are leading
/// zeros in any component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageVersion(semver::Version);

impl PackageVersion {
    /// Parse and validate a version string.
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::InvalidVersion`] if `value` is not a plain
    /// three-component version.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: String| WheelerError::InvalidVersion {
            value: value.to_owned(),
            reason,
        };
        let version = semver::Version::parse(value).map_err(|e| invalid(e.to_string()))?;
        if !version.pre.is_empty() {
            return Err(invalid("pre-release suffixes are not allowed".to_owned()));
        }
        if !version.build.is_empty() {
            return Err(invalid("build metadata is not allowed".to_owned()));
        }
        Ok(Self(version))
    }

    /// Access the underlying semantic version.
    #[must_use]
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the package version from an explicit value or the installer name.
///
/// An explicit value always wins, even when the file name carries a
/// different version.
///
/// # Errors
///
/// Returns [`WheelerError::VersionUnresolvable`] when no explicit value is
/// given and the name does not follow the installer pattern, or
/// [`WheelerError::InvalidVersion`] when the chosen value is malformed.
///
/// # Examples
///
/// ```
/// use pysvn_wheeler::version::{InstallerName, resolve_version};
///
/// let name = InstallerName::parse("custom-build.exe");
/// let version = resolve_version(Some("2.0.0"), &name)?;
/// assert_eq!(version.to_string(), "2.0.0");
/// # Ok::<(), pysvn_wheeler::error::WheelerError>(())
/// ```
pub fn resolve_version(
    explicit: Option<&str>,
    installer: &InstallerName,
) -> Result<PackageVersion> {
    let raw = match explicit {
        Some(value) => value,
        None => installer
            .version()
            .ok_or_else(|| WheelerError::VersionUnresolvable {
                file_name: installer.file_name().to_owned(),
            })?,
    };
    PackageVersion::parse(raw)
}
