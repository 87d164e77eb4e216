//! JSON-RPC 2.0 envelope shared by the storage server and its clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Reserved code: the request names a method the server does not expose.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Reserved code: params failed typed decoding for the named method.
pub const INVALID_PARAMS: i32 = -32602;
/// Application code carried by storage-level failures (e.g. key not found).
pub const APPLICATION_ERROR: i32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    #[serde(default = "version")]
    pub jsonrpc: String,
    /// Opaque correlation token, echoed back verbatim.
    #[serde(default)]
    pub id: Value,
    pub method: String,
    /// Open-shaped params mapping; each method decodes the fields it needs.
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: version(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcResponse {
    /// Success envelope; the error member stays absent.
    pub fn result(id: Value, result: impl Into<String>) -> Self {
        Self {
            jsonrpc: version(),
            id,
            result: Some(result.into()),
            error: None,
        }
    }

    /// Failure envelope; the result member stays absent.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: version(),
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

fn version() -> String {
    JSONRPC_VERSION.to_string()
}
