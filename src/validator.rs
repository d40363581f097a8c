//! Parameter validation and normalisation.
//!
//! Turns a caller supplied [`ProbeParams`] into a [`ProbeRequest`] that the
//! engine can run without further checks: the port is in range, the
//! destination has been resolved to an IP literal and zero or missing
//! counters have been replaced by their defaults.

use crate::error::ProbeError;
use crate::params::ProbeParams;
use crate::protocol::Protocol;
use async_trait::async_trait;
use log::debug;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Number of attempts when the caller does not set one.
pub const DEFAULT_COUNT: u32 = 3;
/// Per attempt deadline in seconds when the caller does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Hostname lookup used during validation.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Returns the addresses `name` resolves to, in resolver order.
    ///
    /// Ports are ignored; IPv6 scope ids are kept so zoned addresses can be told apart.
    async fn resolve(&self, name: &str) -> std::io::Result<Vec<SocketAddr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, name: &str) -> std::io::Result<Vec<SocketAddr>> {
        let mut addrs: Vec<SocketAddr> = Vec::new();
        for addr in tokio::net::lookup_host((name, 0)).await? {
            if !addrs.contains(&addr) {
                addrs.push(addr);
            }
        }
        Ok(addrs)
    }
}

/// A validated probe request. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    /// Destination exactly as the caller gave it, echoed in results.
    pub destination: String,
    pub destination_port: u16,
    pub protocol: Protocol,
    pub count: u32,
    pub timeout: Duration,
    /// Address actually dialled.
    pub resolved_address: IpAddr,
}

impl ProbeRequest {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.resolved_address, self.destination_port)
    }
}

/// Validates `params`, resolving the destination through `resolver`.
pub async fn validate<R>(params: &ProbeParams, resolver: &R) -> Result<ProbeRequest, ProbeError>
where
    R: Resolver + ?Sized,
{
    let destination_port = validate_port(params)?;
    let resolved_address = resolve_destination(&params.destination, resolver).await?;

    let count = match params.count {
        None | Some(0) => DEFAULT_COUNT,
        Some(count) => count,
    };
    let timeout_secs = match params.timeout {
        None | Some(0) => DEFAULT_TIMEOUT_SECS,
        Some(secs) => secs,
    };

    Ok(ProbeRequest {
        destination: params.destination.clone(),
        destination_port,
        protocol: params.protocol,
        count,
        timeout: Duration::from_secs(timeout_secs),
        resolved_address,
    })
}

// Port 0 passes: it is a legal value on the wire even if nothing listens there.
fn validate_port(params: &ProbeParams) -> Result<u16, ProbeError> {
    if !params.protocol.uses_port() {
        return Ok(0);
    }
    let port = params.destination_port.unwrap_or(0);
    u16::try_from(port).map_err(|_| ProbeError::InvalidPort {
        protocol: params.protocol.to_string(),
        port,
    })
}

async fn resolve_destination<R>(destination: &str, resolver: &R) -> Result<IpAddr, ProbeError>
where
    R: Resolver + ?Sized,
{
    let candidate = match resolver.resolve(destination).await {
        Ok(addrs) => match addrs.first() {
            // A zone is not part of an IP literal and cannot be dialled through one.
            Some(SocketAddr::V6(addr)) if addr.scope_id() != 0 => {
                return Err(ProbeError::InvalidAddress(destination.to_string()));
            }
            Some(addr) => {
                debug!("Resolved {} to {} ({} addresses)", destination, addr.ip(), addrs.len());
                return Ok(addr.ip());
            }
            None => return Err(ProbeError::EmptyResolution(destination.to_string())),
        },
        // Not a resolvable name, so it has to be a literal.
        Err(e) => {
            debug!("Lookup of {} failed ({}), trying it as an IP literal", destination, e);
            destination
        }
    };

    candidate
        .parse::<IpAddr>()
        .map_err(|_| ProbeError::InvalidAddress(candidate.to_string()))
}
