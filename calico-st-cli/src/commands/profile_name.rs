//! `calico-st profile-name` command handler

use std::io::Write;

use serde::Serialize;

use calico_st_core::config::StConfig;
use calico_st_utils::{LocalHost, get_profile_name};

use crate::cli::ProfileNameArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `profile-name` command.
pub fn execute(
    args: ProfileNameArgs,
    config: &StConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let host = LocalHost::new(config.host.clone());
    let profile = get_profile_name(&host, &args.network)?;
    writer.render(&ProfileNameReport {
        network: args.network,
        profile,
    })
}

#[derive(Debug, Serialize)]
pub struct ProfileNameReport {
    pub network: String,
    pub profile: String,
}

impl Render for ProfileNameReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}", self.profile)
    }
}
