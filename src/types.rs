use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A token is refreshed once it is this close to its expiry.
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Current layout of the persisted token record.
pub const TOKEN_RECORD_VERSION: u32 = 1;

/// The access token, its refresh token and the instant the access token dies.
///
/// The three fields are always read and written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Nothing usable is stored.
    Missing,
    Valid,
    /// Expired or within [`REFRESH_MARGIN_SECS`] of expiring.
    Expiring,
}

impl TokenState {
    pub fn of(token: Option<&TokenRecord>, now: DateTime<Utc>) -> Self {
        match token {
            Some(t) if !t.access_token.is_empty() => {
                let refresh_from = t
                    .expires_at
                    .checked_sub_signed(Duration::seconds(REFRESH_MARGIN_SECS));
                match refresh_from {
                    Some(refresh_from) if now < refresh_from => TokenState::Valid,
                    _ => TokenState::Expiring,
                }
            }
            _ => TokenState::Missing,
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenState::Missing => "missing",
            TokenState::Valid => "valid",
            TokenState::Expiring => "expiring",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    version: u32,
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        TokenState::of(Some(self), now)
    }

    /// Serializes the record into its versioned JSON form.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&StoredToken {
            version: TOKEN_RECORD_VERSION,
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at,
        })
    }

    /// Parses a persisted record.
    ///
    /// Accepts the versioned JSON form and the legacy flat file made of
    /// exactly three lines (access token, refresh token, ISO-8601 expiry).
    /// Anything else yields `None`: a damaged record means "no token".
    pub fn decode(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.starts_with('{') {
            let stored: StoredToken = serde_json::from_str(raw).ok()?;
            if stored.version != TOKEN_RECORD_VERSION {
                return None;
            }
            return Some(Self {
                access_token: stored.access_token,
                refresh_token: stored.refresh_token,
                expires_at: stored.expires_at,
            });
        }

        let lines: Vec<&str> = raw
            .split('\n')
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if lines.len() != 3 {
            return None;
        }

        Some(Self {
            access_token: lines[0].to_string(),
            refresh_token: lines[1].to_string(),
            expires_at: parse_legacy_timestamp(lines[2])?,
        })
    }
}

// Legacy files carry either an offset-aware timestamp or a naive local one.
fn parse_legacy_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Body of a successful token endpoint response.
///
/// Every field is optional so that missing values can be reported as an
/// authorization failure instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// Body of a failed token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// The user collections that can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    SavedAlbums,
    LikedTracks,
    Playlists,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::SavedAlbums,
        Collection::LikedTracks,
        Collection::Playlists,
    ];

    /// Path relative to the Web API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Collection::SavedAlbums => "me/albums",
            Collection::LikedTracks => "me/tracks",
            Collection::Playlists => "me/playlists",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Collection::SavedAlbums => "saved albums",
            Collection::LikedTracks => "liked songs",
            Collection::Playlists => "playlists",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct AlbumTableRow {
    pub name: String,
    pub artists: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
}

/// Outcome of the authorization redirect, as captured by the callback server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCallback {
    Code(String),
    /// Spotify's `error` parameter, e.g. `access_denied`.
    Denied(String),
}
