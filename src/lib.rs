//! # netprobe: a single-target network reachability probe.
//!
//! Given a destination, a port and a transport protocol, netprobe performs a
//! bounded series of attempts and reports for each one whether the target was
//! reachable, how long the attempt took and how it failed.
//!
//! ## Features
//!
//! - **Validation**: port range checks, hostname resolution and defaulting of counters
//! - **UDP probing**: classifies replies, ICMP refusals and silence
//! - **Pluggable protocols**: one [`ProbeStrategy`] per transport
//! - **Structured output**: self-describing, compact JSON result records
//!
//! ## Example
//!
//! ```rust,no_run
//! use netprobe::{ProbeParams, Protocol, SystemResolver};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = ProbeParams::new("127.0.0.1", Protocol::Udp)
//!         .with_port(53)
//!         .with_count(2)
//!         .with_timeout(1);
//!
//!     let results = netprobe::run(&params, &SystemResolver).await?;
//!
//!     for result in &results {
//!         println!(
//!             "success={} error={:?} rtt={:.3}s",
//!             result.success, result.error, result.rtt_seconds
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod output;
pub mod params;
pub mod protocol;
pub mod strategy;
pub mod validator;

/// Command line interface for netprobe
pub use cli::Cli;
pub use engine::{ProbeEngine, run};
pub use error::ProbeError;
pub use output::{ProbeResult, RunSummary};
pub use params::ProbeParams;
pub use protocol::Protocol;
/// Probe strategies and outcome classification
pub use strategy::{AttemptOutcome, ProbeStrategy, UdpStrategy, strategy_for};
pub use validator::{ProbeRequest, Resolver, SystemResolver, validate};
