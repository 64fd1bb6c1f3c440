use crate::models::{PlayRow, RawArtist, RawPlayItem, RawTrack};
use log::{debug, info};
use rspotify::{model::PlayHistory, prelude::*, AuthCodeSpotify};
use std::sync::Arc;
use thiserror::Error;

/// The service caps the recently-played endpoint at 50 items per call.
const PAGE_LIMIT: u32 = 50;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Extract stage: pulls the authenticated user's recently-played items
/// and flattens them into tabular rows.
pub struct Extractor {
    spotify: Arc<AuthCodeSpotify>,
}

impl Extractor {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        Self {
            spotify: Arc::new(spotify),
        }
    }

    /// Fetches the most recent play history and returns one row per item,
    /// in the order the service returned them. Zero items is a valid
    /// empty batch, not an error.
    pub async fn extract(&self) -> Result<Vec<PlayRow>, ExtractError> {
        info!("Extracting recently played tracks...");

        let page = self
            .spotify
            .current_user_recently_played(Some(PAGE_LIMIT), None)
            .await?;

        let items: Vec<RawPlayItem> = page.items.into_iter().map(RawPlayItem::from).collect();
        let rows = flatten(items);

        info!("Extraction complete: {} rows", rows.len());
        Ok(rows)
    }
}

impl From<PlayHistory> for RawPlayItem {
    fn from(item: PlayHistory) -> Self {
        Self {
            track: RawTrack {
                name: Some(item.track.name),
                popularity: Some(item.track.popularity),
                artists: item
                    .track
                    .artists
                    .into_iter()
                    .map(|artist| RawArtist { name: Some(artist.name) })
                    .collect(),
            },
            played_at: Some(item.played_at),
        }
    }
}

/// Flattens raw items into rows with the fixed column order
/// (song_name, artist_names, popularity, played_at). Pure, so it can be
/// exercised with fixtures instead of a live API call.
pub fn flatten(items: Vec<RawPlayItem>) -> Vec<PlayRow> {
    items
        .into_iter()
        .map(|item| {
            let row = PlayRow {
                song_name: item.track.name,
                artist_names: join_artists(&item.track.artists),
                popularity: item.track.popularity,
                played_at: item.played_at,
            };
            debug!("Extracted row: {:?}", row);
            row
        })
        .collect()
}

/// Joins artist names with ", " preserving source order. An empty artist
/// list or a missing name yields a missing cell, which the transform
/// stage rejects as part of completeness validation.
pub fn join_artists(artists: &[RawArtist]) -> Option<String> {
    if artists.is_empty() {
        return None;
    }

    let mut names: Vec<&str> = Vec::with_capacity(artists.len());
    for artist in artists {
        names.push(artist.name.as_deref()?);
    }

    Some(names.join(", "))
}
