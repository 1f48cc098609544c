//! # API Module
//!
//! HTTP endpoints served by the temporary local server that runs while the
//! `auth` command waits for Spotify's authorization redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Captures the `code` (or `error`) query parameter of the
//!   redirect into shared state. The waiting command performs the actual
//!   code exchange.
//! - [`health`] - Returns application status and version, handy for checking
//!   that the redirect URI points at the right port.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotshelf::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
