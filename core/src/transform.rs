use crate::models::{PlayEvent, PlayRow, PopularityCategory, TransformOutcome};
use chrono::{DateTime, Utc};
use log::info;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Primary keys duplicated: played_at {0} appears more than once; double check data extraction to ensure data is not corrupted")]
    DuplicateKey(DateTime<Utc>),
    #[error("Null values found: row {row}, column {column}")]
    NullValue { row: usize, column: &'static str },
}

/// Transform stage: validates the extracted batch and derives the
/// popularity category for every row.
///
/// An empty batch short-circuits to [`TransformOutcome::Empty`] — the
/// defined "nothing to load" success path. A duplicate `played_at` or a
/// missing cell anywhere invalidates the entire batch; there is no
/// row-level skip or recovery.
pub fn transform(rows: Vec<PlayRow>) -> Result<TransformOutcome, TransformError> {
    if rows.is_empty() {
        info!("User has not played any music.");
        return Ok(TransformOutcome::Empty);
    }

    validate_unique_keys(&rows)?;

    info!("Transforming data...");

    let mut events = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        events.push(promote(index, row)?);
    }

    info!("Transformation complete: {} rows categorized", events.len());
    Ok(TransformOutcome::Populated(events))
}

/// `played_at` acts as the natural key of the target table; a duplicate
/// within one batch means the upstream data is corrupted.
fn validate_unique_keys(rows: &[PlayRow]) -> Result<(), TransformError> {
    let mut seen: HashSet<Option<DateTime<Utc>>> = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.played_at) {
            // A repeated missing timestamp is reported as the null it is,
            // once completeness validation reaches it.
            if let Some(played_at) = row.played_at {
                return Err(TransformError::DuplicateKey(played_at));
            }
        }
    }
    Ok(())
}

fn promote(index: usize, row: PlayRow) -> Result<PlayEvent, TransformError> {
    let null = |column| TransformError::NullValue { row: index, column };

    let song_name = row.song_name.ok_or_else(|| null("song_name"))?;
    let artist_names = row.artist_names.ok_or_else(|| null("artist_names"))?;
    let popularity = row.popularity.ok_or_else(|| null("popularity"))?;
    let played_at = row.played_at.ok_or_else(|| null("played_at"))?;

    Ok(PlayEvent {
        song_name,
        artist_names,
        popularity,
        played_at,
        popularity_category: PopularityCategory::from_popularity(popularity),
    })
}
