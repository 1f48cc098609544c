use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Error, Res, api, types::AuthCallback};

/// Routes served while waiting for the authorization redirect.
pub fn router(state: Arc<Mutex<Option<AuthCallback>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Binds `addr` and serves [`router`] until the task is dropped.
///
/// # Errors
///
/// Returns [`Error::Config`] for an unparsable address and
/// [`Error::Server`] if the socket cannot be bound or serving fails.
pub async fn start_api_server(addr: &str, state: Arc<Mutex<Option<AuthCallback>>>) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("invalid server address {}: {}", addr, e)))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("cannot bind {}: {}", addr, e)))?;
    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
