//! CLI-specific error types and exit code mapping

use calico_st_core::error::{ErrorKind, StError};

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes so that a
/// calling script can tell a failed check from a broken environment.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Helper error from calico-st-utils.
    #[error("{0}")]
    St(#[from] StError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | Check failed / other error           |
    /// | 2    | Configuration error                  |
    /// | 3    | Command exited non-zero              |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) => 1,
            Self::St(e) => match e.kind() {
                ErrorKind::Config => 2,
                ErrorKind::CommandExec => 3,
                ErrorKind::Io => 10,
                ErrorKind::Assertion | ErrorKind::Parse => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use calico_st_core::error::{AssertionError, CommandExecError, ConfigError};

    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("bad flag".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::St(
            ConfigError::FileNotFound {
                path: "calico-st.toml".to_owned(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_assertion() {
        let err = CliError::St(AssertionError::ProfileNotFound("p".to_owned()).into());
        assert_eq!(err.exit_code(), 1, "failed check should return exit code 1");
    }

    #[test]
    fn test_exit_code_command_exec() {
        let err = CliError::St(
            CommandExecError {
                command: "false".to_owned(),
                returncode: Some(1),
                output: String::new(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_io_error() {
        let err = CliError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ));
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_error_display_passes_through_helper_message() {
        let err = CliError::St(AssertionError::NetworkNotFound("net1".to_owned()).into());
        assert!(err.to_string().contains("Docker network net1 not found"));
    }
}
