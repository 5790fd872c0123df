//! Scripted process doubles for tests.
//!
//! [`StubExecutor`] stands in for [`SystemCommandExecutor`] and answers each
//! invocation from a queue of [`ExpectedCall`]s, failing the test when the
//! command line differs from the script.
//!
//! [`SystemCommandExecutor`]: crate::process::SystemCommandExecutor

use crate::process::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::process::{ExitStatus, Output};

/// Build an `ExitStatus` carrying `code`.
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    // Wait status layout: exit code in the second byte.
    ExitStatus::from_raw(code << 8)
}

/// Build an `ExitStatus` carrying `code`.
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

fn output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.into(),
        stderr: stderr.into(),
    }
}

/// Output of a command that exited with status 0.
#[must_use]
pub fn success_output(stdout: &str) -> Output {
    output(0, stdout, "")
}

/// Output of a command that exited with status 1.
#[must_use]
pub fn failure_output(stdout: &str, stderr: &str) -> Output {
    output(1, stdout, stderr)
}

/// One scripted invocation and the response it yields.
#[derive(Debug)]
pub struct ExpectedCall {
    /// Program the caller must run.
    pub cmd: String,
    /// Arguments the caller must pass, in order.
    pub args: Vec<String>,
    /// Returned to the caller; `Err` simulates a spawn failure.
    pub result: io::Result<Output>,
}

impl ExpectedCall {
    /// Expect `cmd` with `args`, answering with a successful empty output.
    #[must_use]
    pub fn new<I, S>(cmd: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cmd: cmd.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            result: Ok(success_output("")),
        }
    }

    /// Replace the response.
    #[must_use]
    pub fn returning(mut self, result: io::Result<Output>) -> Self {
        self.result = result;
        self
    }
}

/// [`CommandExecutor`] that replays a script of expected calls.
#[derive(Debug, Default)]
pub struct StubExecutor {
    script: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Create a stub that expects `script`, in order.
    #[must_use]
    pub fn new(script: Vec<ExpectedCall>) -> Self {
        Self {
            script: RefCell::new(script.into()),
        }
    }

    /// Number of scripted calls not yet made.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.borrow().len()
    }

    /// Fail the test unless every scripted call was made.
    ///
    /// # Panics
    ///
    /// Panics if calls remain in the script.
    pub fn assert_finished(&self) {
        let remaining = self.remaining();
        assert_eq!(remaining, 0, "{remaining} scripted command(s) never ran");
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let Some(call) = self.script.borrow_mut().pop_front() else {
            panic!("unscripted command: {cmd} {}", args.join(" "));
        };
        assert_eq!(cmd, call.cmd, "program mismatch");
        assert_eq!(args, call.args.as_slice(), "argument mismatch for {cmd}");
        call.result
    }
}
