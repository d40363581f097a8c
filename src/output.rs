use crate::protocol::Protocol;
use crate::strategy::AttemptOutcome;
use crate::validator::ProbeRequest;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::time::Duration;

/// Result of one attempt, self-describing so it can be aggregated on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub destination: String,
    #[serde(rename = "destinationport", default, skip_serializing_if = "is_zero_port")]
    pub destination_port: u16,
    pub protocol: Protocol,
    /// Wall clock time of the attempt in seconds.
    #[serde(rename = "rtt", default, skip_serializing_if = "is_zero_rtt")]
    pub rtt_seconds: f64,
}

fn is_zero_port(port: &u16) -> bool {
    *port == 0
}

fn is_zero_rtt(rtt: &f64) -> bool {
    *rtt == 0.0
}

impl ProbeResult {
    pub fn new(request: &ProbeRequest, outcome: &AttemptOutcome, elapsed: Duration) -> Self {
        ProbeResult {
            success: outcome.is_success(),
            error: outcome.error(),
            destination: request.destination.clone(),
            destination_port: request.destination_port,
            protocol: request.protocol,
            rtt_seconds: elapsed.as_secs_f64(),
        }
    }
}

/// Renders results the way the orchestrator expects them: a tab indented JSON array.
pub fn to_json_pretty(results: &[ProbeResult]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    results.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn to_json_file(results: &[ProbeResult], path: &str) -> Result<(), std::io::Error> {
    let json = to_json_pretty(results)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Aggregate view of a run, used for logging.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub attempts: usize,
    pub successes: usize,
    pub responses: usize,
    pub timeouts: usize,
    pub refusals: usize,
    pub failures: usize,
    pub min_rtt: Option<f64>,
    pub avg_rtt: Option<f64>,
    pub max_rtt: Option<f64>,
}

impl RunSummary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = RunSummary {
            attempts: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.success {
                summary.successes += 1;
            }
            match (result.success, result.error.as_deref()) {
                (true, None) => summary.responses += 1,
                (_, Some(crate::strategy::TIMEOUT_TAG)) => summary.timeouts += 1,
                (_, Some(crate::strategy::REFUSED_TAG)) => summary.refusals += 1,
                _ => summary.failures += 1,
            }
        }

        if !results.is_empty() {
            let rtts = results.iter().map(|r| r.rtt_seconds);
            summary.min_rtt = rtts.clone().reduce(f64::min);
            summary.max_rtt = rtts.clone().reduce(f64::max);
            summary.avg_rtt = Some(rtts.sum::<f64>() / results.len() as f64);
        }

        summary
    }
}
