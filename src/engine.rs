use crate::error::ProbeError;
use crate::output::{ProbeResult, RunSummary};
use crate::params::ProbeParams;
use crate::strategy::{ProbeStrategy, strategy_for};
use crate::validator::{ProbeRequest, Resolver, validate};
use log::{debug, info};
use std::time::Instant;

const MAX_PREALLOCATED_RESULTS: usize = 1024;

/// Runs the attempts of one validated request.
pub struct ProbeEngine {
    request: ProbeRequest,
    strategy: Box<dyn ProbeStrategy>,
}

impl ProbeEngine {
    /// Creates an engine using the strategy registered for the request's protocol.
    ///
    /// Fails with [`ProbeError::UnsupportedProtocol`] before any attempt is made
    /// when the protocol has no strategy.
    pub fn new(request: ProbeRequest) -> Result<Self, ProbeError> {
        let strategy = strategy_for(request.protocol)?;
        Self::with_strategy(request, strategy)
    }

    /// Creates an engine with an explicit strategy, which must speak the request's protocol.
    pub fn with_strategy(
        request: ProbeRequest,
        strategy: Box<dyn ProbeStrategy>,
    ) -> Result<Self, ProbeError> {
        if strategy.protocol() != request.protocol {
            return Err(ProbeError::StrategyMismatch {
                protocol: request.protocol.to_string(),
                strategy: strategy.protocol().to_string(),
            });
        }
        Ok(ProbeEngine { request, strategy })
    }

    pub fn request(&self) -> &ProbeRequest {
        &self.request
    }

    /// Runs all `count` attempts, one after another, and returns one result per attempt.
    ///
    /// Attempt failures are recorded in the results; there is no early exit.
    pub async fn run(&self) -> Vec<ProbeResult> {
        let request = &self.request;
        let count = request.count as usize;
        // Large counts grow the vector as attempts complete instead of reserving up front.
        let mut results = Vec::with_capacity(count.min(MAX_PREALLOCATED_RESULTS));

        info!(
            "Probing {}:{} ({}) over {}, {} attempts, {}s timeout",
            request.destination,
            request.destination_port,
            request.resolved_address,
            request.protocol,
            count,
            request.timeout.as_secs()
        );

        for i in 0..count {
            info!("[{}] pinging {}:{}", i, request.destination, request.destination_port);

            let start = Instant::now();
            let outcome = self.strategy.attempt(request).await;
            let elapsed = start.elapsed();

            debug!(
                "[{}] {:?} in {:.3}s",
                i,
                outcome,
                elapsed.as_secs_f64()
            );
            results.push(ProbeResult::new(request, &outcome, elapsed));
        }

        let summary = RunSummary::from_results(&results);
        info!(
            "{} of {} attempts succeeded ({} replies, {} refusals, {} timeouts, {} errors), rtt min/avg/max {:.3}/{:.3}/{:.3}s",
            summary.successes,
            summary.attempts,
            summary.responses,
            summary.refusals,
            summary.timeouts,
            summary.failures,
            summary.min_rtt.unwrap_or_default(),
            summary.avg_rtt.unwrap_or_default(),
            summary.max_rtt.unwrap_or_default()
        );

        results
    }
}

/// Validates `params` and runs the probe.
///
/// Only validation and protocol selection can fail; once attempts start the
/// full result sequence is always returned.
pub async fn run<R>(params: &ProbeParams, resolver: &R) -> Result<Vec<ProbeResult>, ProbeError>
where
    R: Resolver + ?Sized,
{
    let request = validate(params, resolver).await?;
    let engine = ProbeEngine::new(request)?;
    Ok(engine.run().await)
}
