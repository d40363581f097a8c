use crate::error::ProbeError;
use crate::protocol::Protocol;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Parameter set handed to a probe run by the caller.
///
/// Field names match the orchestrator's wire format. Optional fields left
/// out (or set to zero) are filled in by [`crate::validator::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeParams {
    /// IPv4, IPv6 or hostname.
    pub destination: String,
    /// Kept wide so out of range values reach validation instead of failing to parse.
    #[serde(
        rename = "destinationport",
        alias = "destinationPort",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_port: Option<i64>,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Per attempt deadline in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl ProbeParams {
    pub fn new(destination: impl Into<String>, protocol: Protocol) -> Self {
        ProbeParams {
            destination: destination.into(),
            destination_port: None,
            protocol,
            count: None,
            timeout: None,
        }
    }

    pub fn with_port(mut self, port: i64) -> Self {
        self.destination_port = Some(port);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ProbeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads parameters from a JSON file, or from stdin when `path` is `-`.
    pub fn from_json_file(path: &str) -> Result<Self, ProbeError> {
        let read = if path == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        } else {
            std::fs::read_to_string(path)
        };
        let json = read.map_err(|source| ProbeError::ReadParams {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
