use crate::auth::{self, AuthError};
use crate::config::{Config, ConfigError};
use crate::extract::{ExtractError, Extractor};
use crate::load::{self, LoadError};
use crate::transform::{self, TransformError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Runs one complete ETL pass: authenticate, extract, transform, load.
///
/// Stages are sequenced here through their typed outputs instead of
/// calling each other, so each one is testable with fixtures. Any stage
/// failure aborts the run immediately; nothing is committed partially,
/// and re-invocation is the caller's (scheduler's) responsibility.
pub async fn run(config: &Config) -> Result<(), PipelineError> {
    let spotify = auth::get_spotify_client(config).await?;

    let rows = Extractor::new(spotify).extract().await?;
    let outcome = transform::transform(rows)?;
    load::load(&config.database_url, outcome).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::flatten;
    use crate::models::{PlayEvent, PopularityCategory, RawPlayItem, TransformOutcome};
    use chrono::{TimeZone, Utc};

    // End-to-end through the pure stages: a two-item API response comes
    // out as two categorized rows in extraction order.
    #[test]
    fn test_extract_then_transform_two_item_response() {
        let items: Vec<RawPlayItem> = serde_json::from_str(
            r#"[
                {
                    "track": {
                        "name": "Song A",
                        "popularity": 80,
                        "artists": [{"name": "Artist X"}]
                    },
                    "played_at": "2024-01-01T10:00:00Z"
                },
                {
                    "track": {
                        "name": "Song B",
                        "popularity": 30,
                        "artists": [{"name": "Artist Y"}, {"name": "Artist Z"}]
                    },
                    "played_at": "2024-01-01T09:00:00Z"
                }
            ]"#,
        )
        .unwrap();

        let outcome = transform::transform(flatten(items)).unwrap();

        assert_eq!(
            outcome,
            TransformOutcome::Populated(vec![
                PlayEvent {
                    song_name: "Song A".to_string(),
                    artist_names: "Artist X".to_string(),
                    popularity: 80,
                    played_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                    popularity_category: PopularityCategory::Overplayed,
                },
                PlayEvent {
                    song_name: "Song B".to_string(),
                    artist_names: "Artist Y, Artist Z".to_string(),
                    popularity: 30,
                    played_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
                    popularity_category: PopularityCategory::Low,
                },
            ])
        );
    }
}
