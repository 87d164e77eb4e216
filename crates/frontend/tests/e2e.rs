use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use service::storage::{kv_store::KvStore, memory::MemoryKvStore, user_store::UserStore};

use frontend::routes::{self, FrontendState};
use frontend::rpc_client::RpcClient;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestStack {
    frontend_url: String,
    rpc_url: String,
}

async fn serve(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(base_url)
}

/// Spin up the storage back end and a front end forwarding to it.
async fn start_stack() -> anyhow::Result<TestStack> {
    let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
    let backend = server::routes::build_router(server::routes::RpcState { store }, cors());
    let backend_url = serve(backend).await?;
    let rpc_url = format!("{}/rpc", backend_url);

    let state = FrontendState {
        users: Arc::new(UserStore::new()),
        rpc: RpcClient::new(rpc_url.clone()),
    };
    let frontend_url = serve(routes::build_router(state, cors())).await?;

    Ok(TestStack { frontend_url, rpc_url })
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let stack = start_stack().await?;
    let res = reqwest::Client::new()
        .get(format!("{}/health", stack.frontend_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_create_user_forwards_to_kv_store() -> anyhow::Result<()> {
    let stack = start_stack().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/users", stack.frontend_url))
        .json(&json!({"name": "Ada", "age": 36}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let user = res.json::<serde_json::Value>().await?;
    assert_eq!(user["name"], "Ada");
    let id = user["id"].as_str().expect("id assigned").to_string();

    // The forwarded record is readable from the kv store under the user id.
    let res = c
        .post(&stack.rpc_url)
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "get", "params": {"key": id}}))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let stored = body["result"].as_str().expect("stored value");
    let stored: serde_json::Value = serde_json::from_str(stored)?;
    assert_eq!(stored["name"], "Ada");
    assert_eq!(stored["age"], 36);
    Ok(())
}

#[tokio::test]
async fn e2e_user_crud_roundtrip() -> anyhow::Result<()> {
    let stack = start_stack().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/users", stack.frontend_url))
        .json(&json!({"name": "Grace", "age": 45}))
        .send()
        .await?;
    let user = res.json::<serde_json::Value>().await?;
    let id = user["id"].as_str().unwrap().to_string();

    // read back
    let res = c
        .get(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["name"], "Grace");

    // list contains it
    let res = c.get(format!("{}/users", stack.frontend_url)).send().await?;
    let list = res.json::<Vec<serde_json::Value>>().await?;
    assert!(list.iter().any(|u| u["id"] == json!(id)));

    // update keeps the path id
    let res = c
        .put(format!("{}/users/{}", stack.frontend_url, id))
        .json(&json!({"name": "Grace Hopper", "age": 46}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["name"], "Grace Hopper");

    // delete, then 404
    let res = c
        .delete(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c
        .get(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_user_is_not_found() -> anyhow::Result<()> {
    let stack = start_stack().await?;
    let c = reqwest::Client::new();

    let id = Uuid::new_v4();
    let res = c
        .get(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c
        .delete(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_update_inserts_when_absent() -> anyhow::Result<()> {
    let stack = start_stack().await?;
    let c = reqwest::Client::new();

    let id = Uuid::new_v4();
    let res = c
        .put(format!("{}/users/{}", stack.frontend_url, id))
        .json(&json!({"name": "Fresh", "age": 20}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c
        .get(format!("{}/users/{}", stack.frontend_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_create_user_with_backend_down_is_bad_gateway() -> anyhow::Result<()> {
    // Front end alone, forwarding at a port nothing listens on.
    let state = FrontendState {
        users: Arc::new(UserStore::new()),
        rpc: RpcClient::new("http://127.0.0.1:1/rpc"),
    };
    let frontend_url = serve(routes::build_router(state, cors())).await?;

    let res = reqwest::Client::new()
        .post(format!("{}/users", frontend_url))
        .json(&json!({"name": "Nobody", "age": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_GATEWAY);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].is_string());
    Ok(())
}
