//! # CLI Module
//!
//! Command implementations for `spotshelf`. Each command is a thin layer over
//! [`crate::management::TokenManager`]: it builds the manager from the
//! environment, runs one operation, and prints the outcome with the crate's
//! `info!`, `success!`, `warning!` and `error!` macros.
//!
//! ## Available Commands
//!
//! - [`auth`] - Runs the Authorization Code flow and stores the token pair
//! - [`status`] - Shows whether a token is stored and when it expires
//! - [`list`] - Prints saved albums, liked songs or playlists
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotshelf auth                      # Authorize in the browser
//! spotshelf auth --code AQB...        # Exchange a code copied by hand
//! spotshelf albums                    # Saved albums as a table
//! spotshelf playlists --json          # Raw API response
//! spotshelf status                    # Token expiry information
//! ```
//!
//! ## Error Handling
//!
//! Library errors are never retried. Fatal ones terminate the process through
//! `error!` with a message that tells the user what to run next.

mod auth;
mod library;
mod status;

pub use auth::auth;
pub use library::list;
pub use status::status;

use crate::{
    config::Config,
    error,
    management::{FileStore, TokenManager},
};

/// Builds a token manager backed by the configured token directory.
///
/// Terminates the program if the configuration is incomplete or the token
/// store cannot be read.
pub async fn token_manager() -> TokenManager<FileStore> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let store = FileStore::new(config.token_dir.clone());
    match TokenManager::load(config, store).await {
        Ok(manager) => manager,
        Err(e) => error!("Cannot load stored token. Err: {}", e),
    }
}
