//! Simulation dispatch: runs the extracted requests against the oracle,
//! strictly one call in flight at a time.

use crate::error::SimulatorResult;
use crate::types::{SimulationRequest, SimulationResult};
use async_trait::async_trait;
use log::debug;

/// Seam to the external policy simulation capability. The production
/// implementation wraps the IAM `SimulatePrincipalPolicy` API; tests use
/// scripted fakes.
#[async_trait]
pub trait PolicyOracle: Send + Sync {
    async fn simulate(&self, request: &SimulationRequest)
        -> SimulatorResult<SimulationResult>;
}

/// Submit every request in order and collect one result per request, in the
/// same order. The concurrency limit is deliberately one: it bounds load on
/// the external simulator and keeps result correlation trivial. Raising the
/// limit would require tagging results with their source statement rather
/// than relying on completion order.
///
/// Any call failure aborts the batch immediately; no partial results are
/// returned and no retries are made here. An empty request list completes
/// without issuing any call.
pub async fn run_simulations(
    oracle: &dyn PolicyOracle,
    requests: &[SimulationRequest],
) -> SimulatorResult<Vec<SimulationResult>> {
    let mut results = Vec::with_capacity(requests.len());
    for (index, request) in requests.iter().enumerate() {
        debug!(
            "simulating statement {} of {}: {} action(s), {} resource(s)",
            index + 1,
            requests.len(),
            request.action_names.len(),
            request.resource_names.len()
        );
        results.push(oracle.simulate(request).await?);
    }
    Ok(results)
}
