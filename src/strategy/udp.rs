//! UDP reachability probing.
//!
//! UDP has no handshake, so the signal is ambiguous:
//!
//! - **Reply**: any datagram back means the port is open.
//! - **ICMP port unreachable**: surfaced by the kernel as `ECONNREFUSED` on a
//!   connected socket. The host is up and rejecting the port.
//! - **Silence**: the port may be open (most UDP services ignore unsolicited
//!   datagrams) or the packet was dropped. Reported as a timeout.

use super::{AttemptOutcome, ProbeStrategy};
use crate::protocol::Protocol;
use crate::validator::ProbeRequest;
use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Datagram sent on every attempt.
pub const PROBE_PAYLOAD: &[u8] = b"Ping!Ping!Ping!";

const RECV_BUFFER_SIZE: usize = 1500;

#[derive(Debug, Clone, Copy, Default)]
pub struct UdpStrategy;

#[async_trait]
impl ProbeStrategy for UdpStrategy {
    fn protocol(&self) -> Protocol {
        Protocol::Udp
    }

    async fn attempt(&self, request: &ProbeRequest) -> AttemptOutcome {
        let target = request.socket_addr();

        // The socket lives for this attempt only and is closed when dropped.
        let socket = match connect(target).await {
            Ok(socket) => socket,
            Err(e) => {
                debug!("Could not open UDP socket to {}: {}", target, e);
                return AttemptOutcome::Failed(e.to_string());
            }
        };

        if let Err(e) = socket.send(PROBE_PAYLOAD).await {
            debug!("Send to {} failed: {}", target, e);
            return classify_io_error(&e, "write");
        }

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        match timeout(request.timeout, socket.recv(&mut buf)).await {
            Ok(Ok(n)) => {
                debug!("{} bytes from {}", n, target);
                AttemptOutcome::Response(n)
            }
            Ok(Err(e)) => classify_io_error(&e, "read"),
            Err(_) => AttemptOutcome::Timeout,
        }
    }
}

async fn connect(target: SocketAddr) -> std::io::Result<UdpSocket> {
    let local = match target.ip() {
        IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
    };
    let socket = UdpSocket::bind(local).await?;
    socket.connect(target).await?;
    Ok(socket)
}

/// Maps a socket error to an outcome. `op` names the failing call in the raw text.
pub(crate) fn classify_io_error(e: &std::io::Error, op: &str) -> AttemptOutcome {
    match e.kind() {
        ErrorKind::ConnectionRefused => AttemptOutcome::Refused,
        ErrorKind::TimedOut | ErrorKind::WouldBlock => AttemptOutcome::Timeout,
        _ => AttemptOutcome::Failed(format!("{} error: {}", op, e)),
    }
}
