use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    Res, error, info, server::start_api_server, success, types::AuthCallback, warning,
};

use super::token_manager;

const MAX_WAIT: Duration = Duration::from_secs(120);

/// Runs the Authorization Code flow and persists the resulting token.
///
/// Without `code`, a local callback server is started on the configured
/// `SERVER_ADDRESS`, the authorization URL is printed (and opened in the
/// browser unless `open_browser` is false), and the command waits for the
/// redirect. With `code`, the given authorization code is exchanged directly.
pub async fn auth(code: Option<String>, open_browser: bool) {
    let mut manager = token_manager().await;

    let code = match code {
        Some(code) => code,
        None => {
            let auth_url = match manager.build_authorization_url() {
                Ok(url) => url,
                Err(e) => error!("{}", e),
            };

            let shared_state: Arc<Mutex<Option<AuthCallback>>> = Arc::new(Mutex::new(None));
            let server_state = Arc::clone(&shared_state);
            let addr = manager.config().server_addr.clone();
            let server = tokio::spawn(async move { start_api_server(&addr, server_state).await });

            info!("Authorize spotshelf with Spotify:\n{}", auth_url);
            if open_browser && webbrowser::open(auth_url.as_str()).is_err() {
                warning!("Failed to open browser. Please navigate to the URL above manually.");
            }

            let outcome = wait_for_callback(shared_state, &server).await;
            if server.is_finished() {
                if let Ok(Err(e)) = server.await {
                    error!("{}", e);
                }
            } else {
                server.abort();
            }

            match outcome {
                Some(AuthCallback::Code(code)) => code,
                Some(AuthCallback::Denied(reason)) => error!("Authorization denied: {}", reason),
                None => error!("Authorization timed out."),
            }
        }
    };

    match manager.exchange_code(&code).await {
        Ok(token) => success!(
            "Authentication successful! Token valid until {}.",
            token.expires_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        ),
        Err(e) => error!("Token exchange failed: {}", e),
    }
}

/// Polls the shared state once per second until the callback fires, the
/// server task ends, or [`MAX_WAIT`] passes.
async fn wait_for_callback(
    shared_state: Arc<Mutex<Option<AuthCallback>>>,
    server: &JoinHandle<Res<()>>,
) -> Option<AuthCallback> {
    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        if let Some(outcome) = shared_state.lock().await.take() {
            return Some(outcome);
        }
        if server.is_finished() {
            return None;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
