//! Error taxonomy shared by the token manager, the stores and the CLI.

use thiserror::Error;

/// Every failure the library can surface to its caller.
///
/// Nothing is retried internally; the caller decides whether to re-run the
/// authorization flow or simply report the message.
#[derive(Debug, Error)]
pub enum Error {
    /// A client credential or the redirect URI is not configured.
    #[error("missing configuration: {0}")]
    Config(String),

    /// The token endpoint rejected the request or returned no usable token.
    #[error("authorization failed: {0}")]
    Auth(String),

    /// A refresh was attempted without a stored refresh token.
    #[error("no refresh token stored, re-authenticate")]
    State,

    /// The request never produced a usable HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A data endpoint answered with a non-success status.
    #[error("Spotify API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The local callback server could not be started.
    #[error("callback server failed: {0}")]
    Server(String),

    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("cannot encode token record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;
