//! Unit tests for the packaging driver.

use super::*;
use crate::error::WheelerError;
use crate::extractor::MockInstallerExtractor;
use crate::version::PackageVersion;
use crate::wheel::error::PackagingError;
use crate::wheel::tags::WheelTags;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Dirs {
    _root: TempDir,
    staging_parent: Utf8PathBuf,
    output: Utf8PathBuf,
    installer: Utf8PathBuf,
}

impl Dirs {
    fn staging_is_empty(&self) -> bool {
        fs::read_dir(&self.staging_parent)
            .expect("read staging parent")
            .next()
            .is_none()
    }

    fn output_wheels(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output)
            .expect("read output dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".whl"))
            .collect();
        names.sort();
        names
    }
}

#[fixture]
fn dirs() -> Dirs {
    let root = TempDir::new().expect("temp dir");
    let base = Utf8PathBuf::try_from(root.path().to_path_buf()).expect("utf-8 temp dir");
    let staging_parent = base.join("staging");
    let output = base.join("out");
    fs::create_dir_all(&staging_parent).expect("mkdir staging");
    fs::create_dir_all(&output).expect("mkdir out");
    let installer = base.join("py39-pysvn-svn1700-1.10.2-1234.exe");
    fs::write(&installer, b"MZ").expect("write installer");
    Dirs {
        _root: root,
        staging_parent,
        output,
        installer,
    }
}

fn descriptor(installer: &Utf8Path) -> PackageDescriptor {
    PackageDescriptor::pysvn(
        installer.to_owned(),
        PackageVersion::parse("1.10.2").expect("valid version"),
        WheelTags::new("cp39", "cp39", "win32").expect("valid tags"),
    )
}

fn write_payload(destination: &Utf8Path) -> Result<()> {
    fs::write(destination.join("__init__.py"), b"from ._pysvn import *\n")?;
    fs::write(destination.join("_pysvn_3_9.pyd"), b"native module")?;
    Ok(())
}

#[rstest]
fn successful_run_copies_single_archive(dirs: Dirs) {
    let expected_installer = dirs.installer.clone();
    let mut extractor = MockInstallerExtractor::new();
    extractor
        .expect_extract()
        .withf(move |installer, destination| {
            installer == expected_installer.as_path() && destination.ends_with("build/lib/pysvn")
        })
        .times(1)
        .returning(|_, destination| write_payload(destination));

    let driver =
        PackagingDriver::new(&extractor).with_staging_parent(dirs.staging_parent.clone());
    let outcome = driver
        .run(&descriptor(&dirs.installer), &dirs.output)
        .expect("run succeeds");

    assert_eq!(outcome.archive_name, "pysvn-1.10.2-cp39-cp39-win32.whl");
    assert_eq!(outcome.archive_path, dirs.output.join(&outcome.archive_name));
    assert_eq!(dirs.output_wheels(), [outcome.archive_name.as_str()]);
    assert!(dirs.staging_is_empty(), "staging directory must be removed");
}

#[rstest]
fn extraction_failure_leaves_nothing_behind(dirs: Dirs) {
    let mut extractor = MockInstallerExtractor::new();
    extractor.expect_extract().times(1).returning(|_, _| {
        Err(WheelerError::ExtractionFailed {
            output: "not an Inno Setup installer".to_owned(),
        })
    });

    let driver =
        PackagingDriver::new(&extractor).with_staging_parent(dirs.staging_parent.clone());
    let err = driver
        .run(&descriptor(&dirs.installer), &dirs.output)
        .expect_err("run fails");

    assert!(matches!(err, WheelerError::ExtractionFailed { .. }));
    assert!(dirs.output_wheels().is_empty());
    assert!(dirs.staging_is_empty(), "staging directory must be removed");
}

#[rstest]
fn empty_extraction_is_a_packaging_error(dirs: Dirs) {
    let mut extractor = MockInstallerExtractor::new();
    extractor.expect_extract().times(1).returning(|_, _| Ok(()));

    let driver =
        PackagingDriver::new(&extractor).with_staging_parent(dirs.staging_parent.clone());
    let err = driver
        .run(&descriptor(&dirs.installer), &dirs.output)
        .expect_err("run fails");

    assert!(matches!(
        err,
        WheelerError::Packaging(PackagingError::EmptyPayload { .. })
    ));
    assert!(dirs.staging_is_empty(), "staging directory must be removed");
}

#[rstest]
fn missing_output_directory_fails_and_cleans_up(dirs: Dirs) {
    let mut extractor = MockInstallerExtractor::new();
    extractor
        .expect_extract()
        .returning(|_, destination| write_payload(destination));

    let driver =
        PackagingDriver::new(&extractor).with_staging_parent(dirs.staging_parent.clone());
    let missing = dirs.output.join("does-not-exist");
    let err = driver
        .run(&descriptor(&dirs.installer), &missing)
        .expect_err("copy fails");

    assert!(matches!(err, WheelerError::Io(_)));
    assert!(dirs.staging_is_empty(), "staging directory must be removed");
}

fn staged(dirs: &Dirs, name: &str) -> StagedArchive {
    StagedArchive {
        name: name.to_owned(),
        path: dirs.staging_parent.join(name),
    }
}

fn output_entries(dirs: &Dirs) -> Vec<String> {
    fs::read_dir(&dirs.output)
        .expect("read output dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[rstest]
fn copy_archive_keeps_file_name(dirs: Dirs) {
    let archive = staged(&dirs, "pysvn-1.0.0-py3-none-win32.whl");
    fs::write(&archive.path, b"wheel").expect("write archive");

    let outcome = copy_archive(&archive, &dirs.output).expect("copy succeeds");
    assert_eq!(outcome.archive_name, "pysvn-1.0.0-py3-none-win32.whl");
    assert_eq!(fs::read(&outcome.archive_path).expect("read copy"), b"wheel");
    assert_eq!(output_entries(&dirs), [outcome.archive_name.as_str()]);
}

#[rstest]
fn copy_archive_replaces_existing_wheel(dirs: Dirs) {
    let archive = staged(&dirs, "pysvn-1.0.0-py3-none-win32.whl");
    fs::write(&archive.path, b"new wheel").expect("write archive");
    fs::write(dirs.output.join(&archive.name), b"old").expect("write stale wheel");

    let outcome = copy_archive(&archive, &dirs.output).expect("copy succeeds");
    assert_eq!(fs::read(&outcome.archive_path).expect("read copy"), b"new wheel");
}

#[rstest]
fn failed_copy_leaves_no_partial_archive(dirs: Dirs) {
    // A directory opens on unix but fails on the first read, so the copy
    // breaks after the destination file was created.
    let archive = staged(&dirs, "pysvn-1.0.0-py3-none-win32.whl");
    fs::create_dir(&archive.path).expect("mkdir in place of archive");

    let err = copy_archive(&archive, &dirs.output).expect_err("copy fails");
    assert!(matches!(err, WheelerError::Io(_)), "unexpected error: {err:?}");
    let leftovers = output_entries(&dirs);
    assert!(leftovers.is_empty(), "left behind: {leftovers:?}");
}

#[rstest]
fn missing_staged_archive_leaves_output_untouched(dirs: Dirs) {
    let archive = staged(&dirs, "pysvn-1.0.0-py3-none-win32.whl");

    let err = copy_archive(&archive, &dirs.output).expect_err("copy fails");
    assert!(matches!(err, WheelerError::Io(_)), "unexpected error: {err:?}");
    assert!(output_entries(&dirs).is_empty());
}
