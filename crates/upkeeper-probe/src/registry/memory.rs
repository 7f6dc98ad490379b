//! Scripted in-memory registry
//!
//! Used in tests and for running the probe service without a live registry.
//! Outcomes are keyed by (upkeep, caller) and scripted ahead of time; checks
//! for unscripted upkeeps revert.

use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::info;

use upkeeper_common::{CallerAddress, UpkeepId};

use super::{decode_hex_payload, CheckUpkeepOutput, RegistryError, UpkeepRegistry};

/// What a scripted check should do
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Returns(CheckUpkeepOutput),
    RevertsWith(String),
}

/// In-memory registry with scripted outcomes.
///
/// Concurrent checks are safe; outcomes may be re-scripted between calls
/// without tearing a check in progress.
#[derive(Debug)]
pub struct InMemoryRegistry {
    outcomes: DashMap<(UpkeepId, CallerAddress), ScriptedOutcome>,
}

impl InMemoryRegistry {
    /// Create an empty registry. Every check reverts until scripted.
    pub fn new() -> Self {
        Self {
            outcomes: DashMap::new(),
        }
    }

    /// Script a successful check for the given upkeep and caller.
    pub fn set_response(&self, upkeep_id: UpkeepId, caller: CallerAddress, output: CheckUpkeepOutput) {
        self.outcomes
            .insert((upkeep_id, caller), ScriptedOutcome::Returns(output));
    }

    /// Script a reverting check for the given upkeep and caller.
    pub fn set_revert(&self, upkeep_id: UpkeepId, caller: CallerAddress, reason: impl Into<String>) {
        self.outcomes
            .insert((upkeep_id, caller), ScriptedOutcome::RevertsWith(reason.into()));
    }

    /// Number of scripted (upkeep, caller) outcomes.
    pub fn scripted_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Load scripted outcomes from a JSON fixtures file.
    ///
    /// The file holds an array of fixtures; a fixture with a `revert_reason`
    /// scripts a revert, anything else scripts a successful check.
    pub fn from_fixtures_file(path: impl AsRef<Path>) -> Result<Self, FixturesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let fixtures: Vec<UpkeepFixture> = serde_json::from_str(&content)?;

        let registry = Self::new();
        for (index, fixture) in fixtures.iter().enumerate() {
            let upkeep_id = fixture
                .upkeep_id
                .parse::<UpkeepId>()
                .map_err(|e| FixturesError::Invalid {
                    index,
                    message: format!("upkeep_id: {e}"),
                })?;
            let caller = fixture
                .caller
                .parse::<CallerAddress>()
                .map_err(|e| FixturesError::Invalid {
                    index,
                    message: format!("caller: {e}"),
                })?;

            match &fixture.revert_reason {
                Some(reason) => registry.set_revert(upkeep_id, caller, reason.clone()),
                None => {
                    let perform_data =
                        decode_hex_payload(&fixture.perform_data).map_err(|e| {
                            FixturesError::Invalid {
                                index,
                                message: format!("perform_data: {e}"),
                            }
                        })?;
                    registry.set_response(
                        upkeep_id,
                        caller,
                        CheckUpkeepOutput {
                            perform_data,
                            max_payment: fixture.max_payment,
                            gas_limit: fixture.gas_limit,
                            gas_price: fixture.gas_price,
                        },
                    );
                }
            }
        }

        info!(
            fixtures = registry.scripted_count(),
            path = %path.display(),
            "Loaded registry fixtures"
        );
        Ok(registry)
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpkeepRegistry for InMemoryRegistry {
    async fn check_upkeep(
        &self,
        upkeep_id: UpkeepId,
        caller: CallerAddress,
    ) -> Result<CheckUpkeepOutput, RegistryError> {
        match self.outcomes.get(&(upkeep_id, caller)) {
            Some(outcome) => match outcome.value() {
                ScriptedOutcome::Returns(output) => Ok(output.clone()),
                ScriptedOutcome::RevertsWith(reason) => Err(RegistryError::Reverted {
                    reason: reason.clone(),
                }),
            },
            None => Err(RegistryError::Reverted {
                reason: "upkeep not registered".to_string(),
            }),
        }
    }
}

/// One scripted outcome in a fixtures file
#[derive(Debug, Deserialize)]
struct UpkeepFixture {
    upkeep_id: String,
    caller: String,
    /// Hex payload with optional `0x` prefix; ignored when reverting
    #[serde(default)]
    perform_data: String,
    #[serde(default)]
    max_payment: u128,
    #[serde(default)]
    gas_limit: u64,
    #[serde(default)]
    gas_price: u128,
    /// Present iff the scripted check reverts
    #[serde(default)]
    revert_reason: Option<String>,
}

/// Errors from loading a fixtures file
#[derive(Debug, thiserror::Error)]
pub enum FixturesError {
    #[error("failed to read fixtures file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixtures JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fixture {index}: {message}")]
    Invalid { index: usize, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn sample_output() -> CheckUpkeepOutput {
        CheckUpkeepOutput {
            perform_data: Bytes::from_static(b"\xab\xcd"),
            max_payment: 1000,
            gas_limit: 2000,
            gas_price: 3000,
        }
    }

    #[tokio::test]
    async fn test_scripted_response() {
        let registry = InMemoryRegistry::new();
        let upkeep = UpkeepId::from(123u64);
        registry.set_response(upkeep, CallerAddress::ZERO, sample_output());

        let output = registry.check_upkeep(upkeep, CallerAddress::ZERO).await.unwrap();
        assert_eq!(output, sample_output());
    }

    #[tokio::test]
    async fn test_scripted_revert() {
        let registry = InMemoryRegistry::new();
        let upkeep = UpkeepId::from(123u64);
        registry.set_revert(upkeep, CallerAddress::ZERO, "Error");

        let err = registry.check_upkeep(upkeep, CallerAddress::ZERO).await.unwrap_err();
        assert!(matches!(err, RegistryError::Reverted { reason } if reason == "Error"));
    }

    #[tokio::test]
    async fn test_unscripted_check_reverts() {
        let registry = InMemoryRegistry::new();

        let err = registry
            .check_upkeep(UpkeepId::from(9u64), CallerAddress::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Reverted { reason } if reason == "upkeep not registered"));
    }

    #[tokio::test]
    async fn test_outcome_is_keyed_by_caller() {
        let registry = InMemoryRegistry::new();
        let upkeep = UpkeepId::from(123u64);
        let other = CallerAddress::from_bytes([0x11; 20]);
        registry.set_response(upkeep, CallerAddress::ZERO, sample_output());

        assert!(registry.check_upkeep(upkeep, CallerAddress::ZERO).await.is_ok());
        assert!(registry.check_upkeep(upkeep, other).await.is_err());
    }

    #[tokio::test]
    async fn test_fixtures_file() {
        let path = std::env::temp_dir().join(format!(
            "upkeeper-fixtures-{}.json",
            uuid::Uuid::now_v7()
        ));
        let caller = format!("0x{}", "aa".repeat(20));
        let content = serde_json::json!([
            {
                "upkeep_id": "123",
                "caller": caller,
                "perform_data": "0xabcd",
                "max_payment": 1000,
                "gas_limit": 2000,
                "gas_price": 3000
            },
            {
                "upkeep_id": "0x7c",
                "caller": caller,
                "revert_reason": "Error"
            }
        ]);
        std::fs::write(&path, serde_json::to_vec_pretty(&content).unwrap()).unwrap();

        let registry = InMemoryRegistry::from_fixtures_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(registry.scripted_count(), 2);

        let caller = CallerAddress::from_bytes([0xaa; 20]);
        let output = registry
            .check_upkeep(UpkeepId::from(123u64), caller)
            .await
            .unwrap();
        assert_eq!(output.perform_data.as_ref(), b"\xab\xcd");
        assert_eq!(output.gas_limit, 2000);

        let err = registry
            .check_upkeep(UpkeepId::from(0x7cu64), caller)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Reverted { reason } if reason == "Error"));
    }

    #[test]
    fn test_fixtures_file_rejects_bad_caller() {
        let path = std::env::temp_dir().join(format!(
            "upkeeper-fixtures-{}.json",
            uuid::Uuid::now_v7()
        ));
        let content = serde_json::json!([
            { "upkeep_id": "1", "caller": "0x1234" }
        ]);
        std::fs::write(&path, serde_json::to_vec(&content).unwrap()).unwrap();

        let err = InMemoryRegistry::from_fixtures_file(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, FixturesError::Invalid { index: 0, .. }));
    }
}
