//! `calico-st ip` command handler

use std::io::Write;

use serde::Serialize;

use calico_st_core::config::{HostConfig, StConfig};
use calico_st_utils::ip::{RouteProbe, UdpRouteProbe, resolve_from_config};

use crate::cli::IpArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ip` command.
pub fn execute(args: IpArgs, config: &StConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let report = build_report(args, &config.host, UdpRouteProbe)?;
    writer.render(&report)
}

fn build_report<P: RouteProbe>(
    args: IpArgs,
    host: &HostConfig,
    probe: P,
) -> Result<IpReport, CliError> {
    let mut host = host.clone();
    if let Some(target) = args.probe_target {
        host.probe_target = target;
    }
    let source = if host.local_ip.is_some() {
        "override"
    } else {
        "detected"
    };
    let ip = resolve_from_config(&host, probe)?;
    Ok(IpReport {
        ip,
        source: source.to_owned(),
    })
}

#[derive(Debug, Serialize)]
pub struct IpReport {
    pub ip: String,
    /// `override` (MY_IP / config) or `detected`
    pub source: String,
}

impl Render for IpReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{}", self.ip)
    }
}
