//! `calico-st run` command handler

use std::cell::Cell;
use std::io::Write;

use serde::Serialize;
use tracing::info;

use calico_st_core::config::StConfig;
use calico_st_core::error::ErrorKind;
use calico_st_utils::{log_and_run, on_kind};

use crate::cli::RunArgs;
use crate::commands::retry_policy;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
///
/// Only non-zero exits are retried; a shell that cannot be spawned fails at once.
pub fn execute(args: RunArgs, config: &StConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let policy = retry_policy(&config.retry, args.retry);
    let attempts = Cell::new(0u32);

    let output = policy.run_if(
        || {
            attempts.set(attempts.get() + 1);
            log_and_run(&args.command)
        },
        on_kind(ErrorKind::CommandExec),
    )?;

    info!(attempts = attempts.get(), "command succeeded");

    writer.render(&RunReport {
        command: args.command,
        attempts: attempts.get(),
        output,
    })
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub command: String,
    pub attempts: u32,
    pub output: String,
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.output.is_empty() {
            return Ok(());
        }
        writeln!(w, "{}", self.output)
    }
}
