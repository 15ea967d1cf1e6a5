//! `calico-st config` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use calico_st_core::config::StConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
///
/// `loaded` is the result of loading the configuration; `validate` reports a
/// failure as output instead of aborting before anything is printed.
pub fn execute(
    args: ConfigArgs,
    source: &str,
    loaded: Result<StConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(source, loaded, writer),
        ConfigAction::Show => execute_show(source, loaded?, writer),
    }
}

fn execute_validate(
    source: &str,
    loaded: Result<StConfig, CliError>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(source, "validating configuration");

    let report = match loaded {
        Ok(_) => ConfigValidationReport {
            source: source.to_owned(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: source.to_owned(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

fn execute_show(source: &str, config: StConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let config_toml = toml::to_string_pretty(&config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;

    writer.render(&ConfigReport {
        source: source.to_owned(),
        config_toml,
    })
}

#[derive(Debug, Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.valid {
            writeln!(w, "{} {}", "valid".green().bold(), self.source)?;
        } else {
            writeln!(w, "{} {}", "invalid".red().bold(), self.source)?;
            for e in &self.errors {
                writeln!(w, "  - {e}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub source: String,
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "# source: {}", self.source)?;
        write!(w, "{}", self.config_toml)
    }
}
