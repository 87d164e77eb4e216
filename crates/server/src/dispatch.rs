//! Routes a decoded JSON-RPC envelope to one storage operation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::rpc::{self, RpcRequest, RpcResponse};
use service::errors::ServiceError;
use service::storage::kv_store::KvStore;

const SUCCESS: &str = "success";

#[derive(Deserialize)]
struct KeyParams {
    key: String,
}

#[derive(Deserialize)]
struct KeyValueParams {
    key: String,
    value: String,
}

/// Decode params for one method. Params stay open-shaped: extra fields are
/// ignored, while a missing or wrong-typed field yields an invalid-params
/// error.
fn decode_params<P: DeserializeOwned>(id: &Value, params: Value) -> Result<P, RpcResponse> {
    serde_json::from_value(params)
        .map_err(|_| RpcResponse::error(id.clone(), rpc::INVALID_PARAMS, "Invalid params"))
}

fn storage_error(id: Value, err: ServiceError) -> RpcResponse {
    RpcResponse::error(id, rpc::APPLICATION_ERROR, err.to_string())
}

/// One request/response cycle; stateless across calls.
pub async fn dispatch(store: &Arc<dyn KvStore>, req: RpcRequest) -> RpcResponse {
    let RpcRequest { id, method, params, .. } = req;
    debug!(%method, "dispatching rpc request");

    match method.as_str() {
        "get" => {
            let p: KeyParams = match decode_params(&id, params) {
                Ok(p) => p,
                Err(res) => return res,
            };
            match store.get(&p.key).await {
                Ok(value) => RpcResponse::result(id, value),
                Err(e) => storage_error(id, e),
            }
        }
        // createUser is what the user front end emits for newly created
        // records; it carries the same {key, value} params and upserts.
        "post" | "createUser" => {
            let p: KeyValueParams = match decode_params(&id, params) {
                Ok(p) => p,
                Err(res) => return res,
            };
            match store.post(p.key, p.value).await {
                Ok(()) => RpcResponse::result(id, SUCCESS),
                Err(e) => storage_error(id, e),
            }
        }
        "put" => {
            let p: KeyValueParams = match decode_params(&id, params) {
                Ok(p) => p,
                Err(res) => return res,
            };
            match store.put(p.key, p.value).await {
                Ok(()) => RpcResponse::result(id, SUCCESS),
                Err(e) => storage_error(id, e),
            }
        }
        "delete" => {
            let p: KeyParams = match decode_params(&id, params) {
                Ok(p) => p,
                Err(res) => return res,
            };
            match store.delete(&p.key).await {
                Ok(()) => RpcResponse::result(id, SUCCESS),
                Err(e) => storage_error(id, e),
            }
        }
        _ => RpcResponse::error(id, rpc::METHOD_NOT_FOUND, "Method not found"),
    }
}
