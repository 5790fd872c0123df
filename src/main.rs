//! pysvn-wheeler CLI entrypoint.
//!
//! This binary unpacks a pysvn installer, packs its application directory
//! into a wheel and copies the wheel into the output directory. The archive
//! name is printed to stdout; diagnostics go to stderr.

use camino::Utf8PathBuf;
use clap::Parser;
use pysvn_wheeler::cli::Cli;
use pysvn_wheeler::driver::{BuildOutcome, PackagingDriver};
use pysvn_wheeler::error::Result;
use pysvn_wheeler::extractor::InnounpExtractor;
use pysvn_wheeler::output::{success_message, write_line};
use std::io::Write;

/// Exit status for invalid inputs.
const EXIT_INPUT_ERROR: i32 = 1;
/// Exit status for extraction and packaging failures.
const EXIT_BUILD_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli).map(|outcome| {
        write_line(&mut stdout, success_message(&outcome.archive_name));
    });
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Route `log` records to stderr at the level chosen on the command line.
/// `RUST_LOG` takes precedence when set.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<BuildOutcome> {
    let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;

    // All inputs are validated before anything touches the filesystem.
    let descriptor = cli.descriptor(&cwd)?;
    let output_dir = cli.output_dir(&cwd);
    let extractor = InnounpExtractor::new(cli.innounp_path()?);

    PackagingDriver::new(&extractor).run(&descriptor, &output_dir)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            let code = if err.is_input_error() {
                EXIT_INPUT_ERROR
            } else {
                EXIT_BUILD_ERROR
            };
            write_line(stderr, err);
            code
        }
    }
}
