use crate::error::ProbeError;
use crate::params::ProbeParams;
use crate::protocol::Protocol;
use clap::Parser;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "netprobe",
    version,
    about = "Network reachability probe",
    long_about = "netprobe sends a fixed number of probes to one destination and reports, per attempt, \
                  whether it was reachable, how long it took and how it failed. Results are printed as JSON.",
    next_line_help = true,
    after_help = "EXAMPLES:
    netprobe 127.0.0.1:53
    netprobe dns.example.org:53 -t 2 -c 5
    netprobe [::1]:123 -o results.json
    netprobe --params run.json"
)]
pub struct Cli {
    #[arg(
        help = "Destination as host:port (e.g., 192.168.1.1:53, example.org:123, [::1]:53)",
        required_unless_present = "params",
        conflicts_with = "params",
        help_heading = "TARGET SPECIFICATION"
    )]
    pub target: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Read the parameter set as JSON from FILE ('-' for stdin) instead of TARGET",
        help_heading = "TARGET SPECIFICATION"
    )]
    pub params: Option<String>,

    #[arg(
        short = 'P',
        long,
        default_value = "udp",
        help = "Protocol to probe with (udp)",
        help_heading = "PROBE OPTIONS"
    )]
    pub protocol: String,

    #[arg(
        short,
        long,
        default_value_t = 5,
        help = "Timeout for each attempt in seconds",
        help_heading = "PROBE OPTIONS"
    )]
    pub timeout: u64,

    #[arg(
        short,
        long,
        default_value_t = 3,
        help = "Number of attempts",
        help_heading = "PROBE OPTIONS"
    )]
    pub count: u32,

    #[arg(
        short,
        long,
        help = "Also write the results to this JSON file",
        help_heading = "OUTPUT OPTIONS"
    )]
    pub output: Option<String>,

    #[arg(
        short = 'v',
        long,
        conflicts_with = "quiet",
        help = "Verbose logging (per attempt classification)",
        help_heading = "OUTPUT OPTIONS"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        help = "Only log warnings and errors",
        help_heading = "OUTPUT OPTIONS"
    )]
    pub quiet: bool,
}

impl Cli {
    /// Builds the parameter set from either `--params` or the positional target.
    pub fn to_params(&self) -> Result<ProbeParams, ProbeError> {
        if let Some(path) = &self.params {
            return ProbeParams::from_json_file(path);
        }

        let target = self
            .target
            .as_deref()
            .ok_or_else(|| ProbeError::InvalidTarget(String::new()))?;
        let (host, port) = split_host_port(target)?;
        let protocol = Protocol::from_str(&self.protocol)?;

        Ok(ProbeParams::new(host, protocol)
            .with_port(port)
            .with_count(self.count)
            .with_timeout(self.timeout))
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Splits `host:port` on the last colon. Brackets around IPv6 hosts are removed.
pub fn split_host_port(target: &str) -> Result<(String, i64), ProbeError> {
    let invalid = || ProbeError::InvalidTarget(target.to_string());

    let (host, port) = match target.rfind(':') {
        Some(i) if i > 0 => (&target[..i], &target[i + 1..]),
        _ => return Err(invalid()),
    };
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if host.is_empty() {
        return Err(invalid());
    }
    let port = port.parse::<i64>().map_err(|_| invalid())?;

    Ok((host.to_string(), port))
}
