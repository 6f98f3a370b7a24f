use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::{auth::AuthProvider, controller::IndexController};

mod handlers;
pub mod models;
mod session;

use handlers::{
    get_repository, get_status, health, index_repository, list_repositories, me, not_found,
    summary,
};
pub use session::{CurrentUser, SIGN_IN_PATH};

#[derive(Clone)]
pub struct AppState {
    pub controller: IndexController,
    pub auth: Arc<dyn AuthProvider>,
    pub started_at: std::time::SystemTime,
}

impl AppState {
    pub fn new(controller: IndexController, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            controller,
            auth,
            started_at: std::time::SystemTime::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/state", get(summary))
        .route("/repositories", get(list_repositories))
        .route("/repositories/:id", get(get_repository))
        .route("/repositories/:id/status", get(get_status))
        .route("/repositories/:id/index", post(index_repository))
        .fallback(not_found)
        .with_state(state)
}

pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding REST API to {}", addr))
}

pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", listener.local_addr()?);

    let app = router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
