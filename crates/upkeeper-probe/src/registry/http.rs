//! HTTP registry adapter
//!
//! Forwards checks to a registry exposed over HTTP and translates transport
//! failures and error responses into [`RegistryError`] values. The adapter
//! never panics on a response it does not understand; an undecodable body is
//! reported as a malformed response and absorbed by the probe like any other
//! failure.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use upkeeper_common::{CallerAddress, UpkeepId};

use super::{decode_hex_payload, CheckUpkeepOutput, RegistryError, UpkeepRegistry};

/// Registry reachable over HTTP.
///
/// Checks are POSTed to `{endpoint}/v1/check` as JSON. A 2xx response must
/// decode to the full check output; any other status is treated as a revert,
/// with the body (if any) as the reason.
pub struct HttpRegistry {
    endpoint: String,
    timeout: Duration,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpRegistry {
    /// Create an adapter for the registry at `endpoint`.
    pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    /// The configured registry endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl UpkeepRegistry for HttpRegistry {
    async fn check_upkeep(
        &self,
        upkeep_id: UpkeepId,
        caller: CallerAddress,
    ) -> Result<CheckUpkeepOutput, RegistryError> {
        let uri = format!("{}/v1/check", self.endpoint);
        let body = CheckRequestBody {
            upkeep_id: upkeep_id.to_string(),
            caller: caller.to_string(),
        };
        let body = serde_json::to_vec(&body)
            .map_err(|e| RegistryError::Unreachable(format!("failed to encode check request: {e}")))?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(&uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| RegistryError::Unreachable(format!("failed to build check request: {e}")))?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| RegistryError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| RegistryError::Unreachable(format!("failed to read check response: {e}")))?
            .to_bytes();

        debug!(status = %status, body_len = body.len(), uri = %uri, "registry responded");

        if status.is_success() {
            decode_check_response(&body)
        } else {
            Err(revert_from_error_body(status, &body))
        }
    }
}

/// Wire format of a check request
#[derive(Debug, Serialize)]
struct CheckRequestBody {
    upkeep_id: String,
    caller: String,
}

/// Wire format of a successful check response
#[derive(Debug, Deserialize)]
struct CheckResponseBody {
    perform_data: String,
    max_payment: u128,
    gas_limit: u64,
    gas_price: u128,
}

fn decode_check_response(body: &[u8]) -> Result<CheckUpkeepOutput, RegistryError> {
    let parsed: CheckResponseBody = serde_json::from_slice(body)
        .map_err(|e| RegistryError::MalformedResponse(format!("invalid check response: {e}")))?;

    let perform_data = decode_hex_payload(&parsed.perform_data)
        .map_err(|e| RegistryError::MalformedResponse(format!("invalid perform_data hex: {e}")))?;

    Ok(CheckUpkeepOutput {
        perform_data,
        max_payment: parsed.max_payment,
        gas_limit: parsed.gas_limit,
        gas_price: parsed.gas_price,
    })
}

/// Map a non-2xx response to a registry failure.
///
/// Error bodies are either `{"error": "..."}` or plain text; an empty body
/// is an abort without a reason.
fn revert_from_error_body(status: StatusCode, body: &[u8]) -> RegistryError {
    if body.is_empty() {
        return RegistryError::Aborted;
    }

    let reason = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    debug!(status = %status, reason = %reason, "check rejected by registry");
    RegistryError::Reverted { reason }
}
