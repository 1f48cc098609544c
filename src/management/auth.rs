use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::{
    Error, Res,
    config::Config,
    management::KeyValueStore,
    spotify,
    types::{Collection, DEFAULT_EXPIRES_IN_SECS, TokenRecord, TokenResponse, TokenState},
};

/// Key under which the token record is persisted.
pub const TOKEN_KEY: &str = "token.json";

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns the credentials and the token record, and hands out valid access
/// tokens.
///
/// Every successful exchange or refresh is written to the store before the
/// in-memory record changes. Mutating calls take `&mut self`; a host sharing
/// one manager across tasks has to put it behind a single mutex so the
/// check-refresh-persist sequence cannot interleave.
pub struct TokenManager<S: KeyValueStore> {
    config: Config,
    store: S,
    client: Client,
    clock: Clock,
    token: Option<TokenRecord>,
}

impl<S: KeyValueStore> TokenManager<S> {
    /// Creates a manager with no token, without touching the store.
    pub fn new(config: Config, store: S) -> Self {
        TokenManager {
            config,
            store,
            client: Client::new(),
            clock: Arc::new(Utc::now),
            token: None,
        }
    }

    /// Creates a manager and reads the persisted record from `store`.
    ///
    /// A missing or malformed record leaves the manager without a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the store itself fails.
    pub async fn load(config: Config, store: S) -> Res<Self> {
        let mut manager = Self::new(config, store);
        manager.reload().await?;
        Ok(manager)
    }

    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the in-memory record with whatever the store holds.
    pub async fn reload(&mut self) -> Res<()> {
        self.token = self
            .store
            .get(TOKEN_KEY)
            .await?
            .and_then(|raw| TokenRecord::decode(&raw));
        Ok(())
    }

    pub fn build_authorization_url(&self) -> Res<Url> {
        spotify::auth::authorization_url(&self.config)
    }

    /// Trades an authorization code for a token record and persists it.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] if the endpoint rejects the code or the response
    ///   lacks `access_token` or `refresh_token`
    /// - [`Error::Transport`] on network failure
    /// - [`Error::Storage`] if the record cannot be persisted
    pub async fn exchange_code(&mut self, code: &str) -> Res<TokenRecord> {
        let res = spotify::auth::exchange_code(&self.client, &self.config, code).await?;
        let now = self.now();

        let access_token = required_field(res.access_token.clone(), "access_token")?;
        let refresh_token = required_field(res.refresh_token.clone(), "refresh_token")?;

        let token = TokenRecord {
            access_token,
            refresh_token,
            expires_at: expiry(now, &res)?,
        };

        self.persist(&token).await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Renews the access token with the stored refresh token.
    ///
    /// Only `access_token` and `expires_at` change; the stored refresh token
    /// is kept even if the endpoint hands out a new one.
    ///
    /// # Errors
    ///
    /// - [`Error::State`] if no refresh token is stored (no request is made)
    /// - [`Error::Auth`] if the endpoint rejects the refresh token or omits
    ///   `access_token`
    /// - [`Error::Transport`] on network failure
    /// - [`Error::Storage`] if the record cannot be persisted
    pub async fn refresh(&mut self) -> Res<TokenRecord> {
        let refresh_token = match &self.token {
            Some(t) if !t.refresh_token.is_empty() => t.refresh_token.clone(),
            _ => return Err(Error::State),
        };

        let res =
            spotify::auth::refresh_token(&self.client, &self.config, &refresh_token).await?;
        let now = self.now();

        let token = TokenRecord {
            access_token: required_field(res.access_token.clone(), "access_token")?,
            refresh_token,
            expires_at: expiry(now, &res)?,
        };

        self.persist(&token).await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Returns an access token that stays valid for at least five more
    /// minutes, refreshing it first when needed.
    pub async fn get_valid_access_token(&mut self) -> Res<String> {
        if self.state() == TokenState::Valid {
            if let Some(token) = &self.token {
                return Ok(token.access_token.clone());
            }
        }

        Ok(self.refresh().await?.access_token)
    }

    /// Fetches `endpoint` (relative to the API base URL) with a valid token
    /// and returns the JSON body verbatim.
    pub async fn fetch_collection(&mut self, endpoint: &str) -> Res<Value> {
        let token = self.get_valid_access_token().await?;
        spotify::library::fetch_collection(&self.client, &self.config, endpoint, &token).await
    }

    pub async fn fetch(&mut self, collection: Collection) -> Res<Value> {
        self.fetch_collection(collection.endpoint()).await
    }

    pub async fn saved_albums(&mut self) -> Res<Value> {
        self.fetch(Collection::SavedAlbums).await
    }

    pub async fn liked_tracks(&mut self) -> Res<Value> {
        self.fetch(Collection::LikedTracks).await
    }

    pub async fn playlists(&mut self) -> Res<Value> {
        self.fetch(Collection::Playlists).await
    }

    pub fn state(&self) -> TokenState {
        self.state_at(self.now())
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        TokenState::of(self.token.as_ref(), now)
    }

    pub fn current_token(&self) -> Option<&TokenRecord> {
        self.token.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn persist(&self, token: &TokenRecord) -> Res<()> {
        let encoded = token.encode()?;
        self.store.put(TOKEN_KEY, &encoded).await
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

fn required_field(value: Option<String>, name: &str) -> Res<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Auth(format!("token response has no {}", name)))
}

// `expires_in` comes from the server, so an absurd value must not overflow.
fn expiry(now: DateTime<Utc>, res: &TokenResponse) -> Res<DateTime<Utc>> {
    let expires_in = res.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            Error::Auth(format!(
                "token response has invalid expires_in {}",
                expires_in
            ))
        })
}
