//! Package metadata for the generated wheel.
//!
//! Everything here is plain data: the descriptive fields of the `pysvn`
//! distribution, the directive naming the module the installer payload
//! becomes, and the rendering of both into core-metadata text.

use crate::version::PackageVersion;
use crate::wheel::tags::WheelTags;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Core metadata version written to `METADATA`.
const METADATA_VERSION: &str = "2.1";

/// Name of the distribution and of the module it installs.
pub const PYSVN: &str = "pysvn";

const PYSVN_DESCRIPTION: &str = concat!(
    "The pysvn module is a python interface to the Subversion version control ",
    "system. It depends on the native Apache Subversion client which is part ",
    "of this package. Additionally on Windows platform a VC++ Redistributable ",
    "suitable for your Python version have to be installed."
);

const PYSVN_CLASSIFIERS: &[&str] = &[
    "Development Status :: 5 - Production/Stable",
    "Intended Audience :: Developers",
    "License :: OSI Approved :: Apache Software License",
    "Topic :: Software Development :: Version Control",
    "Environment :: Win32 (MS Windows)",
    "Operating System :: Microsoft :: Windows",
];

/// A semantic module name.
///
/// The module name doubles as the directory the payload is extracted into
/// and the single entry of `top_level.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new module name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive metadata of the output distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Distribution name.
    pub name: String,
    /// Distribution version.
    pub version: PackageVersion,
    /// One-line summary.
    pub summary: String,
    /// Long description, written as the `METADATA` body.
    pub description: String,
    /// Author name.
    pub author: String,
    /// Author e-mail address.
    pub author_email: String,
    /// Project home page.
    pub home_page: String,
    /// License identifier.
    pub license: String,
    /// Supported platforms.
    pub platforms: Vec<String>,
    /// Search keywords.
    pub keywords: Vec<String>,
    /// Trove classifiers.
    pub classifiers: Vec<String>,
}

impl PackageMetadata {
    /// Metadata for the `pysvn` distribution at `version`.
    #[must_use]
    pub fn pysvn(version: PackageVersion) -> Self {
        Self {
            name: PYSVN.to_owned(),
            version,
            summary: "Subversion support for Python".to_owned(),
            description: PYSVN_DESCRIPTION.to_owned(),
            author: "Barry Scott".to_owned(),
            author_email: "barryscott@tigris.org".to_owned(),
            home_page: "http://pysvn.tigris.org".to_owned(),
            license: "Apache Software License".to_owned(),
            platforms: vec!["win32".to_owned()],
            keywords: vec!["subversion".to_owned()],
            classifiers: PYSVN_CLASSIFIERS.iter().map(|&c| c.to_owned()).collect(),
        }
    }

    /// Render the `METADATA` document.
    ///
    /// # Examples
    ///
    /// ```
    /// use pysvn_wheeler::metadata::PackageMetadata;
    /// use pysvn_wheeler::version::PackageVersion;
    ///
    /// let metadata = PackageMetadata::pysvn(PackageVersion::parse("1.10.2")?);
    /// let text = metadata.render();
    /// assert!(text.starts_with("Metadata-Version: 2.1\nName: pysvn\nVersion: 1.10.2\n"));
    /// # Ok::<(), pysvn_wheeler::error::WheelerError>(())
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut headers = vec![
            ("Metadata-Version", METADATA_VERSION.to_owned()),
            ("Name", self.name.clone()),
            ("Version", self.version.to_string()),
            ("Summary", self.summary.clone()),
            ("Home-page", self.home_page.clone()),
            ("Author", self.author.clone()),
            ("Author-email", self.author_email.clone()),
            ("License", self.license.clone()),
        ];
        if !self.keywords.is_empty() {
            headers.push(("Keywords", self.keywords.join(",")));
        }
        headers.extend(self.platforms.iter().map(|p| ("Platform", p.clone())));
        headers.extend(self.classifiers.iter().map(|c| ("Classifier", c.clone())));

        let mut out = String::new();
        for (key, value) in headers {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.description);
        out.push('\n');
        out
    }
}

/// Ties the installer payload to a named module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDirective {
    /// Module the payload becomes.
    pub module: ModuleName,
    /// Installer the payload is extracted from.
    pub installer: Utf8PathBuf,
}

impl ModuleDirective {
    /// Directory under `build_lib` that receives the extracted payload.
    #[must_use]
    pub fn payload_dir(&self, build_lib: &Utf8Path) -> Utf8PathBuf {
        build_lib.join(self.module.as_str())
    }
}

/// Everything the driver needs to produce one wheel.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Descriptive metadata.
    pub metadata: PackageMetadata,
    /// The single module and its source installer.
    pub module: ModuleDirective,
    /// Wheel compatibility tags.
    pub tags: WheelTags,
}

impl PackageDescriptor {
    /// Descriptor for converting `installer` into a `pysvn` wheel.
    #[must_use]
    pub fn pysvn(installer: Utf8PathBuf, version: PackageVersion, tags: WheelTags) -> Self {
        Self {
            metadata: PackageMetadata::pysvn(version),
            module: ModuleDirective {
                module: ModuleName::from(PYSVN),
                installer,
            },
            tags,
        }
    }
}
