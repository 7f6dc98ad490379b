//! Core value types shared across the workspace

pub mod caller_address;
pub mod gas;
pub mod probe;
pub mod upkeep_id;
