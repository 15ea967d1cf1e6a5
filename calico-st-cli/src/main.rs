//! calico-st -- calico system-test helpers from the shell
//!
//! Thin binary over `calico-st-utils`: every subcommand loads the
//! configuration, initializes logging and dispatches to one handler in
//! [`commands`]. Failures are reported on stderr and mapped to an exit code
//! by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use calico_st_core::config::{GeneralConfig, StConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let source = cli
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_owned());

    let loaded = load_config(&cli);

    let mut general = loaded
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {e:#}", "warning:".yellow().bold());
    }

    tracing::debug!(source = source.as_str(), "calico-st starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        // validate는 로드 실패도 결과로 보고합니다
        Commands::Config(args) => commands::config::execute(args, &source, loaded, &writer),
        Commands::Ip(args) => commands::ip::execute(args, &loaded?, &writer),
        Commands::Run(args) => commands::run::execute(args, &loaded?, &writer),
        Commands::Check(args) => commands::check::execute(args, &loaded?, &writer),
        Commands::ProfileName(args) => commands::profile_name::execute(args, &loaded?, &writer),
    }
}

/// `--config`가 주어지면 파일을, 아니면 기본값에 환경변수만 적용합니다.
fn load_config(cli: &Cli) -> Result<StConfig, CliError> {
    let config = match &cli.config {
        Some(path) => StConfig::load(path)?,
        None => StConfig::from_env()?,
    };
    Ok(config)
}
