use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::types::{AlbumTableRow, PlaylistTableRow, TrackTableRow};

/// Encodes client credentials for an HTTP Basic `Authorization` header.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{}:{}", client_id, client_secret))
}

fn items(page: &Value) -> impl Iterator<Item = &Value> {
    page["items"].as_array().into_iter().flatten()
}

fn text(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

/// Joins the `name` of every entry of an `artists` array with ", ".
pub fn join_artist_names(artists: &Value) -> String {
    artists
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|a| a["name"].as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Projects a `me/albums` page onto table rows.
pub fn album_rows(page: &Value) -> Vec<AlbumTableRow> {
    items(page)
        .map(|item| AlbumTableRow {
            name: text(&item["album"]["name"]),
            artists: join_artist_names(&item["album"]["artists"]),
        })
        .collect()
}

/// Projects a `me/tracks` page onto table rows.
pub fn track_rows(page: &Value) -> Vec<TrackTableRow> {
    items(page)
        .map(|item| TrackTableRow {
            name: text(&item["track"]["name"]),
            artists: join_artist_names(&item["track"]["artists"]),
        })
        .collect()
}

/// Projects a `me/playlists` page onto table rows.
///
/// Spotify may return `null` entries for playlists that are no longer
/// available; those are skipped.
pub fn playlist_rows(page: &Value) -> Vec<PlaylistTableRow> {
    items(page)
        .filter(|item| item.is_object())
        .map(|item| PlaylistTableRow {
            name: text(&item["name"]),
            id: text(&item["id"]),
        })
        .collect()
}
