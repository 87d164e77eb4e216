use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_json;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::storage::user_store::UserStore;

use crate::routes::{self, FrontendState};
use crate::rpc_client::RpcClient;

fn init_logging() {
    init_logging_json();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let f = cfg.frontend;
            (f.host, f.port)
        }
        Err(_) => {
            let host = env::var("FRONTEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("FRONTEND_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Where created users get forwarded over JSON-RPC.
fn load_rpc_url() -> String {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.rpc.normalize_from_env();
            cfg.rpc.url
        }
        Err(_) => env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:5001/rpc".to_string()),
    }
}

/// Public entry: build the app and run the REST front end
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let rpc_url = load_rpc_url();
    let state = FrontendState {
        users: Arc::new(UserStore::new()),
        rpc: RpcClient::new(rpc_url.clone()),
    };

    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    let addr = load_bind_addr()?;
    info!(%addr, %rpc_url, "starting user front end");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
