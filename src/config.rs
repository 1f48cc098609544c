//! Configuration management for the Spotify library client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, endpoint URLs, the local
//! callback server address and the token storage location.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoints, server address, token directory)

use std::{env, io::ErrorKind, path::PathBuf};

use crate::{Error, Res};

/// Spotify's OAuth authorization endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify's OAuth token endpoint, used for code exchange and refresh.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Base URL of the Spotify Web API.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Permissions requested during authorization.
pub const SCOPE: &str = "user-library-read playlist-read-private user-read-private user-read-email";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotshelf/.env` inside the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/spotshelf/.env`
/// - macOS: `~/Library/Application Support/spotshelf/.env`
/// - Windows: `%LOCALAPPDATA%/spotshelf/.env`
///
/// A missing `.env` file is fine; the variables may come from the process
/// environment instead.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the directory cannot be created and
/// [`Error::Config`] if the file exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Config(format!(
            "cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Resolved runtime configuration.
///
/// The three credentials are mandatory; everything else falls back to the
/// public Spotify endpoints and local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub token_dir: PathBuf,
}

impl Config {
    /// Builds a configuration with the given credentials and default endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            token_dir: data_dir().join("cache"),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Environment
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `SPOTIFY_API_AUTH_CLIENT_ID` | yes | |
    /// | `SPOTIFY_API_AUTH_CLIENT_SECRET` | yes | |
    /// | `SPOTIFY_API_REDIRECT_URI` | yes | |
    /// | `SPOTIFY_API_AUTH_URL` | no | [`DEFAULT_AUTH_URL`] |
    /// | `SPOTIFY_API_TOKEN_URL` | no | [`DEFAULT_TOKEN_URL`] |
    /// | `SPOTIFY_API_URL` | no | [`DEFAULT_API_URL`] |
    /// | `SERVER_ADDRESS` | no | [`DEFAULT_SERVER_ADDRESS`] |
    /// | `SPOTSHELF_TOKEN_DIR` | no | `<data_local_dir>/spotshelf/cache` |
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing required variable.
    pub fn from_env() -> Res<Self> {
        let mut config = Self::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            required("SPOTIFY_API_REDIRECT_URI")?,
        );

        if let Some(url) = optional("SPOTIFY_API_AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(url) = optional("SPOTIFY_API_TOKEN_URL") {
            config.token_url = url;
        }
        if let Some(url) = optional("SPOTIFY_API_URL") {
            config.api_url = url;
        }
        if let Some(addr) = optional("SERVER_ADDRESS") {
            config.server_addr = addr;
        }
        if let Some(dir) = optional("SPOTSHELF_TOKEN_DIR") {
            config.token_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

/// Application directory inside the platform's local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotshelf");
    path
}

fn required(name: &str) -> Res<String> {
    optional(name).ok_or_else(|| Error::Config(format!("{} must be set", name)))
}

// blank values count as unset
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
