use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use common::rpc::{RpcRequest, RpcResponse};

#[derive(Debug, Error)]
pub enum RpcClientError {
    #[error("rpc transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i32, message: String },
}

/// Thin JSON-RPC client over reqwest. Single-shot: every failure surfaces
/// immediately to the caller, nothing is retried.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one envelope and unwrap the response; an error member comes back
    /// as `RpcClientError::Rpc`.
    pub async fn call(&self, method: &str, params: Value) -> Result<String, RpcClientError> {
        let id = Value::from(Uuid::new_v4().to_string());
        let req = RpcRequest::new(id, method, params);

        let res = self
            .http
            .post(&self.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(|e| RpcClientError::Transport(e.to_string()))?;
        if !res.status().is_success() {
            return Err(RpcClientError::Transport(format!(
                "unexpected status {}",
                res.status()
            )));
        }

        let envelope: RpcResponse = res
            .json()
            .await
            .map_err(|e| RpcClientError::Transport(e.to_string()))?;
        if let Some(err) = envelope.error {
            return Err(RpcClientError::Rpc { code: err.code, message: err.message });
        }
        envelope
            .result
            .ok_or_else(|| RpcClientError::Transport("response carries no result".into()))
    }
}
