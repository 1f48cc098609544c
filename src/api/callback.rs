use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::AuthCallback;

/// Receives Spotify's authorization redirect and records its outcome.
///
/// The code exchange itself happens in the waiting command, which owns the
/// token manager.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthCallback>>>>,
) -> Html<&'static str> {
    let outcome = match (params.get("code"), params.get("error")) {
        (Some(code), _) => AuthCallback::Code(code.clone()),
        (None, Some(error)) => AuthCallback::Denied(error.clone()),
        (None, None) => return Html("<h4>Missing authorization code.</h4>"),
    };

    let page = match outcome {
        AuthCallback::Code(_) => {
            "<h2>Authorization received.</h2><p>You can close this browser window.</p>"
        }
        AuthCallback::Denied(_) => "<h4>Authorization was denied.</h4>",
    };

    *shared_state.lock().await = Some(outcome);
    Html(page)
}
