//! `calico-st check` command handler
//!
//! Checks are retried only on assertion failures: calico state converges
//! after the fact, but a broken calicoctl will not fix itself.

use std::cell::Cell;
use std::io::Write;

use serde::Serialize;
use tracing::info;

use calico_st_core::config::StConfig;
use calico_st_core::error::{ErrorKind, StError};
use calico_st_utils::{
    Host, LocalHost, RetryPolicy, assert_network, assert_number_endpoints, assert_profile,
    on_kind,
};

use crate::cli::{CheckAction, CheckArgs};
use crate::commands::retry_policy;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `check` command.
pub fn execute(args: CheckArgs, config: &StConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let mut host_config = config.host.clone();

    let (check, target, retry) = match &args.action {
        CheckAction::Endpoints {
            expected,
            hostname,
            retry,
        } => {
            if let Some(name) = hostname {
                host_config.hostname = Some(name.clone());
            }
            ("endpoints", expected.to_string(), *retry)
        }
        CheckAction::Profile { name, retry } => ("profile", name.clone(), *retry),
        CheckAction::Network { name, retry } => ("network", name.clone(), *retry),
    };

    let host = LocalHost::new(host_config);
    let policy = retry_policy(&config.retry, retry);
    let attempts = run_check(&host, &args.action, policy)?;

    info!(check, target = target.as_str(), attempts, "check passed");

    writer.render(&CheckReport {
        check: check.to_owned(),
        target,
        passed: true,
        attempts,
    })
}

/// Runs one check under `policy`, returning the number of attempts it took.
fn run_check<H: Host>(host: H, action: &CheckAction, policy: RetryPolicy) -> Result<u32, StError> {
    let attempts = Cell::new(0u32);
    policy.run_if(
        || {
            attempts.set(attempts.get() + 1);
            match action {
                CheckAction::Endpoints { expected, .. } => {
                    assert_number_endpoints(&host, *expected)
                }
                CheckAction::Profile { name, .. } => assert_profile(&host, name),
                CheckAction::Network { name, .. } => assert_network(&host, name),
            }
        },
        on_kind(ErrorKind::Assertion),
    )?;
    Ok(attempts.get())
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub check: String,
    pub target: String,
    pub passed: bool,
    pub attempts: u32,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        writeln!(
            w,
            "{} {} {} ({} attempt{})",
            status,
            self.check,
            self.target,
            self.attempts,
            if self.attempts == 1 { "" } else { "s" }
        )
    }
}
