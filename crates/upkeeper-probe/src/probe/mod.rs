//! Cost-measurement probe
//!
//! [`GasUsageProbe`] wraps a registry's check capability and measures the
//! gas consumed by a single delegated check per call. The delegated check is
//! allowed to fail; the failure is absorbed into the measurement result and
//! never propagated to the caller.

pub mod meter;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, instrument, warn};

use upkeeper_common::{ProbeRequest, ProbeResult};

use crate::registry::UpkeepRegistry;
use meter::GasMeter;

/// Measures the gas cost of registry checks.
///
/// The probe holds exactly one registry handle, set at construction and
/// never replaced. It keeps no per-call state, so a single probe can serve
/// concurrent callers without locking.
pub struct GasUsageProbe {
    registry: Arc<dyn UpkeepRegistry>,
}

impl GasUsageProbe {
    /// Create a probe for the given registry.
    pub fn new(registry: Arc<dyn UpkeepRegistry>) -> Self {
        Self { registry }
    }

    /// Measure the gas used by one check.
    ///
    /// Never fails: a revert, a transport error, or a panic inside the
    /// registry implementation yields `succeeded = false` with an empty
    /// payload. The meter is read once, after the delegated check, on the
    /// path shared by both outcomes, so gas is always populated and at
    /// least one unit. Auxiliary fields of a successful check (payment and
    /// gas estimates) are discarded; only the perform payload is kept.
    #[instrument(skip(self, request), fields(upkeep_id = %request.upkeep_id, caller = %request.caller))]
    pub async fn measure(&self, request: ProbeRequest) -> ProbeResult {
        let meter = GasMeter::start();

        let outcome = AssertUnwindSafe(
            self.registry.check_upkeep(request.upkeep_id, request.caller),
        )
        .catch_unwind()
        .await;

        let gas_used = meter.consumed();

        match outcome {
            Ok(Ok(output)) => {
                debug!(
                    gas_used = gas_used.units(),
                    payload_len = output.perform_data.len(),
                    "check succeeded"
                );
                ProbeResult::success(output.perform_data, gas_used)
            }
            Ok(Err(err)) => {
                debug!(gas_used = gas_used.units(), error = %err, "check failed");
                ProbeResult::failure(gas_used)
            }
            Err(panic) => {
                warn!(
                    gas_used = gas_used.units(),
                    reason = panic_message(panic.as_ref()),
                    "check aborted"
                );
                ProbeResult::failure(gas_used)
            }
        }
    }

    /// The registry handle this probe was constructed with.
    pub fn registry(&self) -> Arc<dyn UpkeepRegistry> {
        self.registry.clone()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
