//! Wheel archive creation.
//!
//! Packs every file under the build lib directory into a `.whl` together with
//! the `.dist-info` metadata. The wheel is platform specific
//! (`Root-Is-Purelib: false`) because the payload is a native module.

use super::error::PackagingError;
use super::naming::WheelName;
use super::record::{RecordEntry, render_record};
use super::tags::WheelTags;
use crate::metadata::{ModuleName, PackageMetadata};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Inputs for [`write_wheel`].
#[derive(Debug)]
pub struct WheelParams<'a> {
    /// Distribution metadata.
    pub metadata: &'a PackageMetadata,
    /// Top-level module shipped by the wheel.
    pub module: &'a ModuleName,
    /// Compatibility tags.
    pub tags: &'a WheelTags,
    /// Root of the built payload; paths below it become archive paths.
    pub build_lib: &'a Utf8Path,
    /// Directory the wheel is written into.
    pub dist_dir: &'a Utf8Path,
}

/// Write a wheel and return the path of the archive.
///
/// # Errors
///
/// Returns [`PackagingError::EmptyPayload`] if `build_lib` holds no files,
/// or an I/O or archive error if writing fails.
pub fn write_wheel(params: &WheelParams<'_>) -> Result<Utf8PathBuf, PackagingError> {
    let payload = collect_payload(params.build_lib)?;
    if payload.is_empty() {
        return Err(PackagingError::EmptyPayload {
            dir: params.build_lib.to_owned(),
        });
    }

    let name = WheelName::new(
        &params.metadata.name,
        params.metadata.version.clone(),
        params.tags.clone(),
    );
    fs::create_dir_all(params.dist_dir)?;
    let archive_path = params.dist_dir.join(name.filename());
    log::debug!("writing {} payload files to {archive_path}", payload.len());

    let mut archive = zip::ZipWriter::new(fs::File::create(&archive_path)?);
    let mut records = Vec::with_capacity(payload.len() + 3);

    for (source, archive_name) in &payload {
        let contents = fs::read(source)?;
        add_entry(&mut archive, &mut records, archive_name, &contents)?;
    }

    let dist_info = name.dist_info_dir();
    let metadata_files = [
        ("METADATA", params.metadata.render()),
        ("WHEEL", render_wheel_file(params.tags)),
        ("top_level.txt", format!("{}\n", params.module)),
    ];
    for (file, contents) in &metadata_files {
        let archive_name = format!("{dist_info}/{file}");
        add_entry(&mut archive, &mut records, &archive_name, contents.as_bytes())?;
    }

    let record_path = format!("{dist_info}/RECORD");
    let record = render_record(&records, &record_path);
    archive.start_file(record_path.as_str(), entry_options())?;
    archive.write_all(record.as_bytes())?;

    archive.finish()?;
    Ok(archive_path)
}

/// Render the `WHEEL` file.
#[must_use]
pub fn render_wheel_file(tags: &WheelTags) -> String {
    format!(
        concat!(
            "Wheel-Version: 1.0\n",
            "Generator: pysvn-wheeler ({})\n",
            "Root-Is-Purelib: false\n",
            "Tag: {}\n",
        ),
        env!("CARGO_PKG_VERSION"),
        tags
    )
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
}

fn add_entry(
    archive: &mut zip::ZipWriter<fs::File>,
    records: &mut Vec<RecordEntry>,
    archive_name: &str,
    contents: &[u8],
) -> Result<(), PackagingError> {
    archive.start_file(archive_name, entry_options())?;
    archive.write_all(contents)?;
    records.push(RecordEntry::for_contents(archive_name, contents));
    Ok(())
}

/// Collect `(source_path, archive_name)` pairs for every file below `root`,
/// sorted by archive name.
fn collect_payload(root: &Utf8Path) -> Result<Vec<(Utf8PathBuf, String)>, PackagingError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut payload = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let source = Utf8PathBuf::try_from(entry.path().to_path_buf())
            .map_err(|e| PackagingError::NonUtf8Path(e.into_path_buf()))?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| PackagingError::NonUtf8Path(entry.path().to_path_buf()))?;
        payload.push((source, archive_name(relative)?));
    }
    payload.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(payload)
}

/// Join path components with `/`, as zip archives require.
fn archive_name(relative: &Path) -> Result<String, PackagingError> {
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| PackagingError::NonUtf8Path(relative.to_path_buf()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
