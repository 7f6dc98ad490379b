//! # Upkeeper Probe
//!
//! Gas usage measurement for registry check-upkeep calls.
//!
//! Registries expose a single check capability that reports whether an
//! upkeep needs performing. The probe wraps that capability: it delegates
//! one check per call, measures the gas the delegation consumed, and folds
//! any failure of the check into the measurement result instead of
//! propagating it. Callers get a cost estimate without the registry having
//! to carry measurement instrumentation of its own.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      REST API (axum)                       │
//! │  POST /v1/measure   GET /v1/registry   GET /metrics        │
//! └─────────────────────────────┬──────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴──────────────────────────────┐
//! │                       GasUsageProbe                        │
//! │   meter start -> delegate check -> classify -> meter read  │
//! └─────────────────────────────┬──────────────────────────────┘
//!                               │ Arc<dyn UpkeepRegistry>
//!              ┌────────────────┴─────────────────┐
//!     ┌────────┴─────────┐             ┌──────────┴────────┐
//!     │   HttpRegistry   │             │ InMemoryRegistry  │
//!     │  (live registry) │             │ (scripted double) │
//!     └──────────────────┘             └───────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod metrics;
pub mod probe;
pub mod registry;

// Re-export core types
pub use probe::{meter::GasMeter, GasUsageProbe};
pub use registry::{
    CheckUpkeepOutput, HttpRegistry, InMemoryRegistry, RegistryError, UpkeepRegistry,
};

/// Probe version
pub const PROBE_VERSION: &str = "0.1.0";

/// Default REST API port
pub const DEFAULT_PORT: u16 = 8090;

/// Default timeout for registry checks in milliseconds
pub const DEFAULT_REGISTRY_TIMEOUT_MS: u64 = 5000;
