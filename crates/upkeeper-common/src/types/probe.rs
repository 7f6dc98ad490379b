//! Probe request and result types

use bytes::Bytes;

use super::caller_address::CallerAddress;
use super::gas::Gas;
use super::upkeep_id::UpkeepId;

/// Input for a single gas measurement.
///
/// Both fields are forwarded to the registry unmodified; the probe performs
/// no validation of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Upkeep to check
    pub upkeep_id: UpkeepId,
    /// Address the check is performed on behalf of
    pub caller: CallerAddress,
}

impl ProbeRequest {
    pub fn new(upkeep_id: UpkeepId, caller: CallerAddress) -> Self {
        Self { upkeep_id, caller }
    }
}

/// Outcome of a single gas measurement.
///
/// Built only through [`ProbeResult::success`] and [`ProbeResult::failure`],
/// so a failed check always carries an empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    succeeded: bool,
    perform_data: Bytes,
    gas_used: Gas,
}

impl ProbeResult {
    /// Result for a check that completed normally.
    pub fn success(perform_data: Bytes, gas_used: Gas) -> Self {
        Self {
            succeeded: true,
            perform_data,
            gas_used,
        }
    }

    /// Result for a check that failed, with the payload normalized to empty.
    pub fn failure(gas_used: Gas) -> Self {
        Self {
            succeeded: false,
            perform_data: Bytes::new(),
            gas_used,
        }
    }

    /// Whether the delegated check completed without failing.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Payload returned by a successful check, empty otherwise.
    pub fn perform_data(&self) -> &Bytes {
        &self.perform_data
    }

    /// Gas consumed by the check, including the probe's own bookkeeping.
    pub fn gas_used(&self) -> Gas {
        self.gas_used
    }
}
