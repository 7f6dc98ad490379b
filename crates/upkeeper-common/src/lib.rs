//! # Upkeeper Common
//!
//! Shared value types for the Upkeeper gas usage probe.
//!
//! ## Core Types
//!
//! - [`UpkeepId`]: opaque 256-bit identifier of an upkeep
//! - [`CallerAddress`]: 20-byte address of the entity the check runs for
//! - [`Gas`]: gas unit count measured by the probe
//! - [`ProbeRequest`]/[`ProbeResult`]: probe call input and outcome

pub mod types;

// Re-export commonly used types at crate root
pub use types::{
    caller_address::{CallerAddress, ParseCallerAddressError},
    gas::Gas,
    probe::{ProbeRequest, ProbeResult},
    upkeep_id::{ParseUpkeepIdError, UpkeepId},
};

/// Upkeeper version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
