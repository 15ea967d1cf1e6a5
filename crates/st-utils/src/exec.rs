//! Shell command execution.
//!
//! [`log_and_run`] runs a command through `sh -c` with stdout and stderr
//! merged into a single pipe, so the captured text reads the same as it
//! would in a terminal. A non-zero exit is turned into a
//! [`CommandExecError`] that keeps the output, giving test logs a readable
//! diagnostic instead of a bare exit code.

use std::io::Read;
use std::process::{Command, Stdio};

use calico_st_core::error::{CommandExecError, StError};
use tracing::{debug, info};

/// Shell used to interpret command strings.
const SHELL: &str = "sh";

/// Runs `command` in a subshell and returns its merged output with trailing
/// whitespace removed.
///
/// The command string is logged at `info` level before execution.
///
/// # Errors
///
/// - `StError::CommandExec`: the process exited non-zero or was killed by a signal
/// - `StError::Io`: the shell could not be spawned or its output could not be read
///
/// # Examples
///
/// ```no_run
/// let out = calico_st_utils::exec::log_and_run("echo hi ")?;
/// assert_eq!(out, "hi");
/// # Ok::<(), calico_st_core::StError>(())
/// ```
pub fn log_and_run(command: &str) -> Result<String, StError> {
    info!(command, "running command");

    let (mut reader, writer) = std::io::pipe()?;
    let mut child = {
        let mut cmd = Command::new(SHELL);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        cmd.spawn()?
        // `cmd` drops here, closing the parent's copies of the write end so
        // the read below sees EOF once the child exits.
    };

    let mut raw = Vec::new();
    let read_result = reader.read_to_end(&mut raw);
    let status = child.wait()?;
    read_result?;

    let output = String::from_utf8_lossy(&raw).trim_end().to_owned();

    if status.success() {
        debug!(command, bytes = output.len(), "command succeeded");
        Ok(output)
    } else {
        Err(CommandExecError {
            command: command.to_owned(),
            returncode: status.code(),
            output,
        }
        .into())
    }
}
