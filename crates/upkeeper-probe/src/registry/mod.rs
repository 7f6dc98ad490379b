//! Registry abstraction
//!
//! The probe delegates to exactly one registry capability: `check_upkeep`.
//! Implementations live behind the [`UpkeepRegistry`] trait so the probe can
//! run against a live registry over HTTP or a scripted in-memory double.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use upkeeper_common::{CallerAddress, UpkeepId};

pub use http::HttpRegistry;
pub use memory::InMemoryRegistry;

/// Full output of a registry check.
///
/// The registry reports the perform payload plus payment and gas estimates.
/// The probe keeps only `perform_data`; the estimates are carried so that
/// adapters stay faithful to the registry's response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckUpkeepOutput {
    /// Payload to pass to a subsequent perform call
    pub perform_data: Bytes,
    /// Maximum payment the registry would pay for performing
    pub max_payment: u128,
    /// Gas limit configured for the upkeep
    pub gas_limit: u64,
    /// Gas price the registry used for its payment estimate
    pub gas_price: u128,
}

/// Errors a registry implementation may raise from a check
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("check reverted: {reason}")]
    Reverted { reason: String },

    #[error("check aborted without a reason")]
    Aborted,

    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("malformed registry response: {0}")]
    MalformedResponse(String),

    #[error("check timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// A registry the probe can delegate checks to.
#[async_trait]
pub trait UpkeepRegistry: Send + Sync {
    /// Check whether the upkeep needs to be performed.
    ///
    /// Returns the full check output on success. Any failure, including the
    /// upkeep not being eligible, surfaces as a [`RegistryError`].
    async fn check_upkeep(
        &self,
        upkeep_id: UpkeepId,
        caller: CallerAddress,
    ) -> Result<CheckUpkeepOutput, RegistryError>;
}

/// Decode a hex payload string with an optional `0x` prefix.
pub(crate) fn decode_hex_payload(s: &str) -> Result<Bytes, hex::FromHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map(Bytes::from)
}
