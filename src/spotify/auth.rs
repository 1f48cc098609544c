use reqwest::{Client, header};
use url::Url;

use crate::{
    Error, Res,
    config::{Config, SCOPE},
    types::{TokenErrorResponse, TokenResponse},
    utils,
};

/// Builds the URL the user visits to grant this application access.
///
/// Carries `client_id`, `response_type=code`, `redirect_uri` and the fixed
/// scope list. The result depends only on the configuration.
///
/// # Errors
///
/// Returns [`Error::Config`] if the configured authorization endpoint is not
/// an absolute URL.
///
/// # Example
///
/// ```
/// let url = authorization_url(&config)?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorization_url(config: &Config) -> Res<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", SCOPE),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization URL {}: {}", config.auth_url, e)))
}

/// Exchanges an authorization code for a token pair.
///
/// Sends the client credentials as HTTP Basic authentication and the code with
/// the redirect URI as a form body, following the Authorization Code grant.
///
/// # Errors
///
/// - [`Error::Transport`] when the request cannot be sent or read
/// - [`Error::Auth`] when the endpoint answers with a non-success status
pub async fn exchange_code(client: &Client, config: &Config, code: &str) -> Res<TokenResponse> {
    request_token(
        client,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await
}

/// Obtains a fresh access token with a stored refresh token.
///
/// # Errors
///
/// Same as [`exchange_code`].
pub async fn refresh_token(
    client: &Client,
    config: &Config,
    refresh_token: &str,
) -> Res<TokenResponse> {
    request_token(
        client,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Res<TokenResponse> {
    let res = client
        .post(&config.token_url)
        .header(
            header::AUTHORIZATION,
            format!(
                "Basic {}",
                utils::basic_credentials(&config.client_id, &config.client_secret)
            ),
        )
        .form(form)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error_description {
                Some(description) => format!("{}: {}", err.error, description),
                None => err.error,
            },
            Err(_) => format!("token endpoint returned {}", status),
        };
        return Err(Error::Auth(message));
    }

    Ok(res.json::<TokenResponse>().await?)
}
