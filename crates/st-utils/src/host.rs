//! Command execution target.
//!
//! The assertion helpers never spawn processes themselves; they go through
//! the [`Host`] trait. Harnesses that drive calico inside containers provide
//! their own implementation, [`LocalHost`] runs everything on this machine,
//! and tests substitute a mock with canned output.

use calico_st_core::config::HostConfig;
use calico_st_core::error::StError;

use crate::exec::log_and_run;

/// A machine the control-plane CLI runs on.
pub trait Host {
    /// Name under which the host appears in `calicoctl endpoint show`.
    fn hostname(&self) -> Result<String, StError>;

    /// Runs a shell command on the host and returns its trimmed output.
    ///
    /// # Errors
    ///
    /// A non-zero exit must be reported as `StError::CommandExec`; the
    /// network assertion relies on that to tell "not found" apart from
    /// other failures.
    fn execute(&self, command: &str) -> Result<String, StError>;

    /// calicoctl binary used by [`calicoctl`](Self::calicoctl).
    fn calicoctl_bin(&self) -> &str {
        "calicoctl"
    }

    /// docker binary used for network inspection.
    fn docker_bin(&self) -> &str {
        "docker"
    }

    /// Runs `calicoctl <args>` on the host.
    fn calicoctl(&self, args: &str) -> Result<String, StError> {
        self.execute(&format!("{} {args}", self.calicoctl_bin()))
    }
}

impl<H: Host + ?Sized> Host for &H {
    fn hostname(&self) -> Result<String, StError> {
        (**self).hostname()
    }

    fn execute(&self, command: &str) -> Result<String, StError> {
        (**self).execute(command)
    }

    fn calicoctl_bin(&self) -> &str {
        (**self).calicoctl_bin()
    }

    fn docker_bin(&self) -> &str {
        (**self).docker_bin()
    }

    fn calicoctl(&self, args: &str) -> Result<String, StError> {
        (**self).calicoctl(args)
    }
}

/// [`Host`] that runs commands on the local machine via [`log_and_run`].
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    config: HostConfig,
}

impl LocalHost {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl Host for LocalHost {
    /// Uses the configured hostname, falling back to the kernel node name.
    fn hostname(&self) -> Result<String, StError> {
        match &self.config.hostname {
            Some(name) => Ok(name.clone()),
            None => log_and_run("uname -n"),
        }
    }

    fn execute(&self, command: &str) -> Result<String, StError> {
        log_and_run(command)
    }

    fn calicoctl_bin(&self) -> &str {
        &self.config.calicoctl
    }

    fn docker_bin(&self) -> &str {
        &self.config.docker
    }
}
