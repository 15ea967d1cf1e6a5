//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// calico-st -- calico system-test helpers from the shell.
///
/// Use `calico-st <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "calico-st", version, about, long_about = None)]
pub struct Cli {
    /// Path to a calico-st.toml file. Defaults plus env overrides when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the local host IP (MY_IP override or auto-detected).
    Ip(IpArgs),

    /// Run a shell command, retrying until it exits zero.
    Run(RunArgs),

    /// Assert on calicoctl / docker state.
    Check(CheckArgs),

    /// Print the calico profile name docker created for a network.
    ProfileName(ProfileNameArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

/// Retry flags shared by commands that poll.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RetryArgs {
    /// Additional attempts after the first (default from config).
    #[arg(long)]
    pub retries: Option<u32>,

    /// Delay between attempts in milliseconds (default from config).
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

// ---- ip ----

#[derive(Args, Debug)]
pub struct IpArgs {
    /// Address used to pick the outbound interface (ip:port).
    #[arg(long)]
    pub probe_target: Option<String>,
}

// ---- run ----

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Shell command, passed to `sh -c`.
    pub command: String,

    #[command(flatten)]
    pub retry: RetryArgs,
}

// ---- check ----

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub action: CheckAction,
}

#[derive(Subcommand, Debug)]
pub enum CheckAction {
    /// Assert the number of endpoints calico reports for this host.
    Endpoints {
        /// Expected endpoint count.
        expected: u32,

        /// Hostname to look up (default from config, then `uname -n`).
        #[arg(long)]
        hostname: Option<String>,

        #[command(flatten)]
        retry: RetryArgs,
    },
    /// Assert that a profile is registered in calico.
    Profile {
        /// Profile name.
        name: String,

        #[command(flatten)]
        retry: RetryArgs,
    },
    /// Assert that a docker network exists.
    Network {
        /// Network name.
        name: String,

        #[command(flatten)]
        retry: RetryArgs,
    },
}

// ---- profile-name ----

#[derive(Args, Debug)]
pub struct ProfileNameArgs {
    /// Docker network name.
    pub network: String,
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_endpoints_with_retry() {
        let cli = Cli::try_parse_from([
            "calico-st",
            "check",
            "endpoints",
            "3",
            "--hostname",
            "calico-01",
            "--retries",
            "5",
        ])
        .expect("should parse");
        match cli.command {
            Commands::Check(CheckArgs {
                action:
                    CheckAction::Endpoints {
                        expected,
                        hostname,
                        retry,
                    },
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(hostname.as_deref(), Some("calico-01"));
                assert_eq!(retry.retries, Some(5));
                assert_eq!(retry.interval_ms, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["calico-st", "ip", "--output", "json", "-c", "x.toml"])
            .expect("should parse");
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn parse_run_command_string() {
        let cli = Cli::try_parse_from(["calico-st", "run", "calicoctl node status"])
            .expect("should parse");
        match cli.command {
            Commands::Run(args) => assert_eq!(args.command, "calicoctl node status"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn endpoints_requires_integer() {
        assert!(Cli::try_parse_from(["calico-st", "check", "endpoints", "many"]).is_err());
    }
}
