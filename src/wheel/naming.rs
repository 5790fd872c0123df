//! Wheel file naming.
//!
//! Builds `{distribution}-{version}-{python}-{abi}-{platform}.whl` names and
//! the matching `.dist-info` directory name.

use super::tags::WheelTags;
use crate::version::PackageVersion;
use std::fmt;

/// The fixed file extension for wheel archives.
pub const WHEEL_EXTENSION: &str = ".whl";

/// A fully-qualified wheel archive name.
///
/// # Examples
///
/// ```
/// use pysvn_wheeler::version::PackageVersion;
/// use pysvn_wheeler::wheel::naming::WheelName;
/// use pysvn_wheeler::wheel::tags::WheelTags;
///
/// let name = WheelName::new(
///     "pysvn",
///     PackageVersion::parse("1.10.2")?,
///     WheelTags::new("cp39", "cp39", "win32")?,
/// );
/// assert_eq!(name.to_string(), "pysvn-1.10.2-cp39-cp39-win32.whl");
/// assert_eq!(name.dist_info_dir(), "pysvn-1.10.2.dist-info");
/// # Ok::<(), pysvn_wheeler::error::WheelerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelName {
    distribution: String,
    version: PackageVersion,
    tags: WheelTags,
}

impl WheelName {
    /// Create a wheel name; `distribution` is escaped for use in file names.
    #[must_use]
    pub fn new(distribution: &str, version: PackageVersion, tags: WheelTags) -> Self {
        Self {
            distribution: escape_distribution(distribution),
            version,
            tags,
        }
    }

    /// The escaped distribution name.
    #[must_use]
    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// Name of the `.dist-info` directory inside the archive.
    #[must_use]
    pub fn dist_info_dir(&self) -> String {
        format!("{}-{}.dist-info", self.distribution, self.version)
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WheelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}{WHEEL_EXTENSION}",
            self.distribution, self.version, self.tags
        )
    }
}

/// Replace every run of characters outside `[A-Za-z0-9.]` with `_`.
fn escape_distribution(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            escaped.push(c);
            in_run = false;
        } else if !in_run {
            escaped.push('_');
            in_run = true;
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pysvn", "pysvn")]
    #[case("py-svn", "py_svn")]
    #[case("py--svn_x", "py_svn_x")]
    fn escapes_distribution_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_distribution(raw), expected);
    }

    #[test]
    fn filename_matches_display() {
        let name = WheelName::new(
            "pysvn",
            PackageVersion::parse("1.9.12").expect("valid version"),
            WheelTags::new("cp38", "cp38", "win_amd64").expect("valid tags"),
        );
        assert_eq!(name.filename(), "pysvn-1.9.12-cp38-cp38-win_amd64.whl");
        assert_eq!(name.filename(), name.to_string());
    }
}
