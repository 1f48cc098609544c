//! # Spotify Integration Module
//!
//! Thin wrappers around the two Spotify services this crate talks to. Each
//! function issues exactly one HTTP request and maps failures onto
//! [`crate::Error`]; token bookkeeping lives in [`crate::management`].
//!
//! ```text
//! TokenManager (management)
//!      ↓
//! ├── auth     POST accounts.spotify.com/api/token
//! └── library  GET  api.spotify.com/v1/me/{albums,tracks,playlists}
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 Authorization Code grant with a client
//! secret: the authorization URL, the code exchange and the refresh grant.
//! Client credentials travel as an HTTP Basic header.
//!
//! ## Library
//!
//! [`library`] reads a user collection with a bearer token and returns the
//! JSON body verbatim. Pagination is not followed.
//!
//! ## Error Types
//!
//! - **`Error::Auth`** - token endpoint rejected the request
//! - **`Error::Api`** - data endpoint answered with a non-success status
//! - **`Error::Transport`** - network issues or undecodable bodies

pub mod auth;
pub mod library;
