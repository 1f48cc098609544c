//! Spotify Library Client
//!
//! This library authenticates against the Spotify Web API with the OAuth 2.0
//! Authorization Code grant, keeps the resulting access token fresh, and reads
//! three collections of the authenticated user: saved albums, liked songs and
//! playlists.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and the `Res` alias
//! - `management` - Token lifecycle and token persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API calls (token endpoint, library endpoints)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotshelf::{config::{self, Config}, management::{FileStore, TokenManager}};
//!
//! #[tokio::main]
//! async fn main() -> spotshelf::Res<()> {
//!     config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let store = FileStore::new(config.token_dir.clone());
//!     let mut manager = TokenManager::load(config, store).await?;
//!     let albums = manager.saved_albums().await?;
//!     println!("{}", albums);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Res};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Opening the authorization page...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only used
/// by the command layer, never inside the library operations, which return
/// [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that don't require program termination.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, open the URL manually");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
