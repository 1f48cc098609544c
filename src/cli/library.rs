use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tabled::Table;

use crate::{Error, error, info, types::Collection, utils, warning};

use super::token_manager;

/// Fetches one collection and prints it.
///
/// With `json` set the API response is printed verbatim (pretty-printed);
/// otherwise the first page is rendered as a table.
pub async fn list(collection: Collection, json: bool) {
    let mut manager = token_manager().await;

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {}...", collection));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let page = manager.fetch(collection).await;
    pb.finish_and_clear();

    let page = match page {
        Ok(page) => page,
        Err(Error::State) => error!(
            "Cannot fetch {}: no token stored. Run `spotshelf auth` first.",
            collection
        ),
        Err(e) => error!("Cannot fetch {}. Err: {}", collection, e),
    };

    if json {
        match serde_json::to_string_pretty(&page) {
            Ok(s) => println!("{}", s),
            Err(e) => error!("Cannot print response. Err: {}", e),
        }
        return;
    }

    print_table(collection, &page);
}

fn print_table(collection: Collection, page: &Value) {
    let (shown, table) = match collection {
        Collection::SavedAlbums => {
            let rows = utils::album_rows(page);
            (rows.len(), Table::new(rows))
        }
        Collection::LikedTracks => {
            let rows = utils::track_rows(page);
            (rows.len(), Table::new(rows))
        }
        Collection::Playlists => {
            let rows = utils::playlist_rows(page);
            (rows.len(), Table::new(rows))
        }
    };

    if shown == 0 {
        warning!("No {} found.", collection);
        return;
    }

    println!("{}", table);
    match page["total"].as_u64() {
        Some(total) => info!("Showing {} of {} {}.", shown, total, collection),
        None => info!("Showing {} {}.", shown, collection),
    }
}
