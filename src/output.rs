//! Output formatting for the converter CLI.

use std::fmt::Display;
use std::io::Write;

/// Label printed before the archive name on success.
pub const SUCCESS_LABEL: &str = "wheel written to:";

/// Format the success report for `archive_name`.
///
/// # Example
///
/// ```
/// use pysvn_wheeler::output::success_message;
///
/// let message = success_message("pysvn-1.10.2-cp39-cp39-win32.whl");
/// assert_eq!(message, "\nwheel written to:\npysvn-1.10.2-cp39-cp39-win32.whl");
/// ```
#[must_use]
pub fn success_message(archive_name: &str) -> String {
    format!("\n{SUCCESS_LABEL}\n{archive_name}")
}

/// Write `message` and a newline, ignoring write failures.
pub fn write_line(out: &mut dyn Write, message: impl Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
