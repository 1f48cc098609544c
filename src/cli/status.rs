use chrono::Local;

use crate::{info, success, types::TokenState, warning};

use super::token_manager;

/// Reports whether a token is stored and how long it stays valid.
pub async fn status() {
    let manager = token_manager().await;

    let Some(token) = manager.current_token() else {
        warning!("No token stored. Run `spotshelf auth` first.");
        return;
    };

    let expires_at = token.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    match manager.state() {
        TokenState::Valid => success!("Access token valid until {}.", expires_at),
        TokenState::Expiring => {
            info!("Access token expired or expiring at {}.", expires_at);
            info!("It will be refreshed on the next request.")
        }
        TokenState::Missing => {
            warning!("Stored token has no access token. It will be refreshed on the next request.")
        }
    }
}
