//! The command run once the database is reachable.
//!
//! On unix the workload replaces the current process image, so it keeps our
//! pid, file descriptors and environment and its exit status is the one the
//! caller sees. Other platforms spawn the program and propagate its exit code.

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::process::{Command, ExitStatus};

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Ordered argument vector passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    argv: Vec<OsString>,
}

impl Workload {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    pub fn program(&self) -> Option<&OsStr> {
        self.argv.first().map(OsString::as_os_str)
    }

    pub fn args(&self) -> &[OsString] {
        self.argv.get(1..).unwrap_or_default()
    }

    /// Hand control to the workload.
    ///
    /// Returns `Ok(0)` for an empty workload. On unix a successful launch
    /// never returns; elsewhere the child's exit code is returned.
    pub fn launch(&self) -> Result<i32> {
        if self.is_empty() {
            info!("no command given, exiting");
            return Ok(0);
        }
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "failed to flush stdout before launching command");
        }

        #[cfg(unix)]
        {
            Err(self.exec())
        }
        #[cfg(not(unix))]
        {
            self.spawn_and_wait()
        }
    }

    /// Replace the current process image with the workload.
    ///
    /// Only returns if the replacement failed.
    #[cfg(unix)]
    pub fn exec(&self) -> Error {
        use std::os::unix::process::CommandExt;

        let Some(mut command) = self.command() else {
            return self.exec_error(io::ErrorKind::InvalidInput.into());
        };
        info!(program = %self.display_program(), "executing command");
        let err = command.exec();
        self.exec_error(err)
    }

    /// Run the workload as a child with inherited stdio and wait for it.
    pub fn spawn_and_wait(&self) -> Result<i32> {
        let Some(mut command) = self.command() else {
            return Ok(0);
        };
        info!(program = %self.display_program(), "spawning command");
        let mut child = command.spawn().map_err(|e| self.exec_error(e))?;
        let status = child.wait().map_err(|source| Error::Wait {
            program: self.display_program(),
            source,
        })?;
        Ok(exit_code(status))
    }

    fn command(&self) -> Option<Command> {
        let program = self.program()?;
        let mut command = Command::new(program);
        command.args(self.args());
        Some(command)
    }

    fn display_program(&self) -> String {
        self.program()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn exec_error(&self, source: io::Error) -> Error {
        Error::Exec {
            program: self.display_program(),
            source,
        }
    }
}

/// Map a child's status to the code a shell would report.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
