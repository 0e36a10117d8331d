//! Channel signature verification
//!
//! A single JSON-RPC call per check against the wallet server. Every failure
//! mode collapses to `false` for the caller; the distinguishing reason only
//! exists in the log trail. Signature checks sit on the synchronous path of a
//! privileged action, so there are no retries.

use crate::metrics;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const VERIFY_METHOD: &str = "verify.Signature";

#[derive(Clone)]
pub struct SignatureVerifier {
    http: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: VerifyParams<'a>,
}

#[derive(Serialize)]
struct VerifyParams<'a> {
    channel_id: &'a str,
    signature: &'a str,
    signing_ts: &'a str,
    data_hex: &'a str,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<VerifyResult>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct VerifyResult {
    #[serde(default)]
    is_valid: bool,
}

#[derive(Deserialize)]
struct RpcError {
    message: Option<String>,
}

impl SignatureVerifier {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Check that `channel_id` produced `signature` over `data_hex` at
    /// `signing_ts`. Returns `true` only for an explicit valid result from
    /// the remote; transport errors, timeouts, and malformed or error
    /// responses all resolve to `false`.
    pub async fn verify(
        &self,
        channel_id: &str,
        data_hex: &str,
        signature: &str,
        signing_ts: &str,
    ) -> bool {
        let request = RpcRequest {
            method: VERIFY_METHOD,
            params: VerifyParams {
                channel_id,
                signature,
                signing_ts,
                data_hex,
            },
        };

        let response = match self.http.post(&self.endpoint).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%channel_id, error = %e, "signature rpc transport error");
                metrics::record_signature_verification("transport_error");
                return false;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%channel_id, error = %e, "failed to read signature rpc response");
                metrics::record_signature_verification("transport_error");
                return false;
            }
        };

        if body.trim().is_empty() {
            warn!(%channel_id, "signature rpc returned an empty response");
            metrics::record_signature_verification("empty_response");
            return false;
        }

        let parsed: RpcResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(%channel_id, error = %e, "signature rpc returned a malformed response");
                metrics::record_signature_verification("malformed_response");
                return false;
            }
        };

        if let Some(error) = parsed.error {
            warn!(
                %channel_id,
                message = error.message.as_deref().unwrap_or(""),
                "signature rpc returned an error"
            );
            metrics::record_signature_verification("remote_error");
            return false;
        }

        match parsed.result {
            Some(result) => {
                if result.is_valid {
                    debug!(%channel_id, %signing_ts, "channel signature accepted");
                    metrics::record_signature_verification("valid");
                } else {
                    warn!(%channel_id, %signing_ts, "channel signature rejected");
                    metrics::record_signature_verification("invalid");
                }
                result.is_valid
            }
            None => {
                warn!(%channel_id, "signature rpc response carried neither result nor error");
                metrics::record_signature_verification("malformed_response");
                false
            }
        }
    }
}
