//! The `RECORD` manifest of a wheel.
//!
//! Each archive member is listed with a `sha256=` digest in unpadded
//! URL-safe base64 and its size in bytes. The `RECORD` file lists itself
//! with both fields empty.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// One line of a `RECORD` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    path: String,
    hash: String,
    size: u64,
}

impl RecordEntry {
    /// Describe an archive member from its contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use pysvn_wheeler::wheel::record::RecordEntry;
    ///
    /// let entry = RecordEntry::for_contents("pysvn/__init__.py", b"");
    /// assert_eq!(
    ///     entry.to_line(),
    ///     "pysvn/__init__.py,sha256=47DEQpj8HBSa-_TImW-5JCeuQeRkm5NMpJWZG3hSuFU,0"
    /// );
    /// ```
    #[must_use]
    pub fn for_contents(path: &str, contents: &[u8]) -> Self {
        let digest = Sha256::digest(contents);
        Self {
            path: path.to_owned(),
            hash: format!("sha256={}", URL_SAFE_NO_PAD.encode(digest)),
            size: contents.len() as u64,
        }
    }

    /// Path of the member inside the archive.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `sha256=` prefixed digest.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Size of the member in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Render the entry as a CSV line without the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{},{},{}", csv_field(&self.path), self.hash, self.size)
    }
}

/// Render a complete `RECORD` file, ending with the self-reference line.
#[must_use]
pub fn render_record(entries: &[RecordEntry], record_path: &str) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_line());
        out.push('\n');
    }
    out.push_str(&csv_field(record_path));
    out.push_str(",,\n");
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
