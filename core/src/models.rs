/*
    spotify-history-etl | Rust ETL job to load Spotify listening history into Postgres.
    Copyright (C) 2026  spotify-history-etl contributors

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One artist entry as the music service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub name: Option<String>,
}

/// Track metadata nested inside a recently-played item.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    pub name: Option<String>,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
}

/// One recently-played item as returned by the music service, before
/// flattening. Transient: owned by the Extractor and discarded once the
/// tabular batch is built.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayItem {
    pub track: RawTrack,
    pub played_at: Option<DateTime<Utc>>,
}

/// One flattened row as extracted. Cells are still optional because
/// upstream completeness has not been validated yet; the Transformer
/// promotes rows to [`PlayEvent`] or rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayRow {
    pub song_name: Option<String>,
    pub artist_names: Option<String>,
    pub popularity: Option<u32>,
    pub played_at: Option<DateTime<Utc>>,
}

/// One validated, categorized row, ready to be appended to the store.
/// `played_at` is unique within a batch and acts as the natural key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayEvent {
    pub song_name: String,
    pub artist_names: String,
    pub popularity: u32,
    pub played_at: DateTime<Utc>,
    pub popularity_category: PopularityCategory,
}

/// Four-bucket categorization of the 0-100 popularity score. Lower
/// bounds are inclusive: 25, 50 and 75 belong to the next bucket up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PopularityCategory {
    Unknown,
    Low,
    High,
    Overplayed,
}

impl PopularityCategory {
    pub fn from_popularity(popularity: u32) -> Self {
        match popularity {
            0..=24 => Self::Unknown,
            25..=49 => Self::Low,
            50..=74 => Self::High,
            _ => Self::Overplayed,
        }
    }

    /// The exact text stored in the `popularity_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Low => "Low",
            Self::High => "High",
            Self::Overplayed => "Overplayed",
        }
    }
}

impl fmt::Display for PopularityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the transform stage. An empty extraction is a valid
/// terminal state, not an error; the loader pattern-matches this instead
/// of guessing emptiness from the batch itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    Empty,
    Populated(Vec<PlayEvent>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bucket_boundaries() {
        assert_eq!(
            PopularityCategory::from_popularity(0),
            PopularityCategory::Unknown
        );
        assert_eq!(
            PopularityCategory::from_popularity(24),
            PopularityCategory::Unknown
        );
        assert_eq!(
            PopularityCategory::from_popularity(25),
            PopularityCategory::Low
        );
        assert_eq!(
            PopularityCategory::from_popularity(49),
            PopularityCategory::Low
        );
        assert_eq!(
            PopularityCategory::from_popularity(50),
            PopularityCategory::High
        );
        assert_eq!(
            PopularityCategory::from_popularity(74),
            PopularityCategory::High
        );
        assert_eq!(
            PopularityCategory::from_popularity(75),
            PopularityCategory::Overplayed
        );
        assert_eq!(
            PopularityCategory::from_popularity(100),
            PopularityCategory::Overplayed
        );
    }

    #[test]
    fn test_category_text_matches_table_values() {
        assert_eq!(PopularityCategory::Unknown.as_str(), "Unknown");
        assert_eq!(PopularityCategory::Low.as_str(), "Low");
        assert_eq!(PopularityCategory::High.as_str(), "High");
        assert_eq!(PopularityCategory::Overplayed.as_str(), "Overplayed");
        assert_eq!(format!("{}", PopularityCategory::Overplayed), "Overplayed");
    }

    #[test]
    fn test_raw_item_deserializes_from_api_shape() {
        let item: RawPlayItem = serde_json::from_str(
            r#"{
                "track": {
                    "name": "Song A",
                    "popularity": 80,
                    "artists": [{"name": "Artist X"}]
                },
                "played_at": "2024-01-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(item.track.name.as_deref(), Some("Song A"));
        assert_eq!(item.track.popularity, Some(80));
        assert_eq!(item.track.artists.len(), 1);
        assert!(item.played_at.is_some());
    }
}
