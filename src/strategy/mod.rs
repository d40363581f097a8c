//! Protocol specific probing.
//!
//! A [`ProbeStrategy`] performs one attempt against a validated request and
//! reports an [`AttemptOutcome`]. Per attempt failures never surface as
//! errors; the engine folds every outcome into a result record.

pub mod udp;

use crate::error::ProbeError;
use crate::protocol::Protocol;
use crate::validator::ProbeRequest;
use async_trait::async_trait;

pub use udp::UdpStrategy;

/// Error tag recorded when an attempt's deadline expired without a reply.
pub const TIMEOUT_TAG: &str = "timeout";
/// Error tag recorded when the destination explicitly refused the probe.
pub const REFUSED_TAG: &str = "connection refused (no response)";

/// Classified outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The destination replied with this many bytes.
    Response(usize),
    /// Nothing came back before the deadline.
    Timeout,
    /// The destination host actively rejected the probe (ICMP port unreachable).
    Refused,
    /// Any other transport failure, with the raw error text.
    Failed(String),
}

impl AttemptOutcome {
    /// A refusal counts as success: the host is alive and answering.
    /// A timeout does not, even though UDP silence often means an open port.
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Response(_) | AttemptOutcome::Refused)
    }

    pub fn error(&self) -> Option<String> {
        match self {
            AttemptOutcome::Response(_) => None,
            AttemptOutcome::Timeout => Some(TIMEOUT_TAG.to_string()),
            AttemptOutcome::Refused => Some(REFUSED_TAG.to_string()),
            AttemptOutcome::Failed(msg) => Some(msg.clone()),
        }
    }
}

/// One implementation per protocol.
#[async_trait]
pub trait ProbeStrategy: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// Runs one attempt. Must finish within `request.timeout` plus socket setup.
    async fn attempt(&self, request: &ProbeRequest) -> AttemptOutcome;
}

/// Picks the strategy for `protocol`, or fails if it has none yet.
pub fn strategy_for(protocol: Protocol) -> Result<Box<dyn ProbeStrategy>, ProbeError> {
    match protocol {
        Protocol::Udp => Ok(Box::new(UdpStrategy)),
        Protocol::Tcp | Protocol::Icmp => {
            Err(ProbeError::UnsupportedProtocol(protocol.to_string()))
        }
    }
}
