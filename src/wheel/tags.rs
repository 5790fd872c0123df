//! Wheel compatibility tags.
//!
//! A wheel built from a native installer is tied to one interpreter ABI and
//! one Windows platform. Both are recoverable from the official installer
//! name; callers can override each tag.

use crate::error::{Result, WheelerError};
use crate::version::InstallerName;
use std::fmt;

/// Python tag used when the installer name does not reveal the interpreter.
const FALLBACK_PYTHON_TAG: &str = "py3";

/// ABI tag for wheels not tied to a CPython ABI.
const NO_ABI: &str = "none";

/// First CPython release whose ABI tag dropped the `m` (pymalloc) suffix.
const UNSUFFIXED_ABI_SINCE: (u32, u32) = (3, 8);

/// Explicit tag values that replace the derived ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOverrides<'a> {
    /// Python tag, e.g. `cp310`.
    pub python: Option<&'a str>,
    /// ABI tag, e.g. `cp37m` or `abi3`.
    pub abi: Option<&'a str>,
    /// Platform tag, e.g. `win_arm64`.
    pub platform: Option<&'a str>,
}

/// The `python-abi-platform` tag triple of a wheel.
///
/// # Examples
///
/// ```
/// use pysvn_wheeler::version::InstallerName;
/// use pysvn_wheeler::wheel::tags::{TagOverrides, WheelTags};
///
/// let name = InstallerName::parse("py39-pysvn-svn1700-1.10.2-1234-Win64.exe");
/// let tags = WheelTags::resolve(&name, &TagOverrides::default())?;
/// assert_eq!(tags.to_string(), "cp39-cp39-win_amd64");
/// # Ok::<(), pysvn_wheeler::error::WheelerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelTags {
    python: String,
    abi: String,
    platform: String,
}

impl WheelTags {
    /// Create a tag triple from explicit components.
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::InvalidTag`] if any component is empty or
    /// contains characters other than ASCII alphanumerics, `_` and `.`.
    pub fn new(python: &str, abi: &str, platform: &str) -> Result<Self> {
        Ok(Self {
            python: validate_tag("python", python)?,
            abi: validate_tag("abi", abi)?,
            platform: validate_tag("platform", platform)?,
        })
    }

    /// Derive tags from the installer name, applying any overrides.
    ///
    /// Unless overridden, the ABI follows the python tag: CPython before 3.8
    /// (`cp27`, `cp37`) implies the `m`-suffixed ABI (`cp37m`), later CPython
    /// tags imply the same ABI tag (`cp39`), anything else gets `none`.
    ///
    /// # Errors
    ///
    /// Returns [`WheelerError::InvalidTag`] if an override is malformed.
    pub fn resolve(installer: &InstallerName, overrides: &TagOverrides<'_>) -> Result<Self> {
        let python = match overrides.python {
            Some(tag) => tag.to_owned(),
            None => installer
                .python_digits()
                .map_or_else(|| FALLBACK_PYTHON_TAG.to_owned(), |d| format!("cp{d}")),
        };
        let abi = overrides
            .abi
            .map_or_else(|| derived_abi(&python), str::to_owned);
        let platform = overrides.platform.unwrap_or(if installer.is_win64() {
            "win_amd64"
        } else {
            "win32"
        });
        Self::new(&python, &abi, platform)
    }

    /// The python tag, e.g. `cp39`.
    #[must_use]
    pub fn python(&self) -> &str {
        &self.python
    }

    /// The ABI tag, e.g. `cp39` or `none`.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// The platform tag, e.g. `win_amd64`.
    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

impl fmt::Display for WheelTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.python, self.abi, self.platform)
    }
}

/// ABI tag implied by a python tag.
fn derived_abi(python: &str) -> String {
    let Some(digits) = python.strip_prefix("cp") else {
        return NO_ABI.to_owned();
    };
    match cpython_release(digits) {
        Some(release) if release < UNSUFFIXED_ABI_SINCE => format!("{python}m"),
        _ => python.to_owned(),
    }
}

/// Split `37` / `310` into `(major, minor)`.
fn cpython_release(digits: &str) -> Option<(u32, u32)> {
    let mut chars = digits.chars();
    let major = chars.next()?.to_digit(10)?;
    let minor = chars.as_str().parse().ok()?;
    Some((major, minor))
}

fn validate_tag(kind: &'static str, value: &str) -> Result<String> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(value.to_owned())
    } else {
        Err(WheelerError::InvalidTag {
            kind,
            value: value.to_owned(),
        })
    }
}
