//! Local host IP detection.
//!
//! The harness may pin the address through the `MY_IP` environment variable,
//! which matters on machines with more than one configured address. Without
//! it, the address is auto-detected by "connecting" a UDP socket to a public
//! address and reading back the locally bound address. Connecting a UDP
//! socket only selects a route; no packet is sent.
//!
//! [`resolve_local_ip`] is the pure form: the override and the socket
//! factory ([`RouteProbe`]) are passed in explicitly, so tests never depend
//! on the process environment or on network access.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use calico_st_core::config::{DEFAULT_PROBE_TARGET, HostConfig, LOCAL_IP_ENV};
use calico_st_core::error::StError;
use tracing::debug;

/// Finds the local address the OS would use to reach a target.
pub trait RouteProbe {
    /// Returns the local IP of the interface routed towards `target`.
    fn local_ip_for(&self, target: SocketAddr) -> io::Result<IpAddr>;
}

/// [`RouteProbe`] backed by a connected UDP socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpRouteProbe;

impl RouteProbe for UdpRouteProbe {
    fn local_ip_for(&self, target: SocketAddr) -> io::Result<IpAddr> {
        let bind_addr: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.connect(target)?;
        Ok(socket.local_addr()?.ip())
    }
}

impl<P: RouteProbe + ?Sized> RouteProbe for &P {
    fn local_ip_for(&self, target: SocketAddr) -> io::Result<IpAddr> {
        (**self).local_ip_for(target)
    }
}

/// Returns `override_ip` verbatim when present, otherwise asks `probe` for
/// the address routed towards `target`.
///
/// # Errors
///
/// Returns `StError::Io` if the probe fails (e.g. no network). There is no
/// fallback address.
pub fn resolve_local_ip<P: RouteProbe>(
    override_ip: Option<&str>,
    probe: P,
    target: SocketAddr,
) -> Result<String, StError> {
    if let Some(ip) = override_ip {
        debug!(ip, "using local ip override");
        return Ok(ip.to_owned());
    }

    let ip = probe.local_ip_for(target)?;
    debug!(%ip, %target, "detected local ip");
    Ok(ip.to_string())
}

/// Resolves the local IP using host configuration (`local_ip`, `probe_target`).
pub fn resolve_from_config<P: RouteProbe>(host: &HostConfig, probe: P) -> Result<String, StError> {
    if let Some(ip) = host.local_ip.as_deref() {
        return resolve_local_ip(Some(ip), probe, default_target());
    }
    resolve_local_ip(None, probe, host.probe_addr()?)
}

/// Returns the local host IP, honouring the `MY_IP` override.
pub fn get_ip() -> Result<String, StError> {
    let override_ip = std::env::var(LOCAL_IP_ENV).ok();
    resolve_local_ip(override_ip.as_deref(), UdpRouteProbe, default_target())
}

fn default_target() -> SocketAddr {
    DEFAULT_PROBE_TARGET
        .parse()
        .unwrap_or_else(|_| SocketAddr::from((Ipv4Addr::new(8, 8, 8, 8), 80)))
}
