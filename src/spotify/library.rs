use reqwest::Client;
use serde_json::Value;

use crate::{Error, Res, config::Config};

/// Issues an authenticated GET against a Web API endpoint.
///
/// `endpoint` is relative to the configured API base URL, for example
/// `me/albums`. Only the first page the API returns is fetched; the body is
/// handed back exactly as received.
///
/// # Errors
///
/// - [`Error::Transport`] for network failures or a body that is not JSON
/// - [`Error::Api`] when Spotify answers with a non-success status
///
/// # Example
///
/// ```
/// let page = fetch_collection(&client, &config, "me/playlists", &token).await?;
/// for item in page["items"].as_array().into_iter().flatten() {
///     println!("{}", item["name"]);
/// }
/// ```
pub async fn fetch_collection(
    client: &Client,
    config: &Config,
    endpoint: &str,
    token: &str,
) -> Res<Value> {
    let api_url = format!(
        "{uri}/{endpoint}",
        uri = config.api_url.trim_end_matches('/'),
        endpoint = endpoint.trim_start_matches('/')
    );

    let res = client.get(&api_url).bearer_auth(token).send().await?;

    let status = res.status();
    if !status.is_success() {
        let body: Value = res.json().await.unwrap_or(Value::Null);
        let message = body["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(res.json::<Value>().await?)
}
