use crate::models::{PlayEvent, TransformOutcome};
use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;

/// Rows per INSERT statement.
const INSERT_BATCH_SIZE: usize = 500;

const INSERT_PREFIX: &str = "INSERT INTO public.\"Recently_Played_Popularity\" \
     (song_name, artist_names, popularity, played_at, popularity_category) ";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Load stage: appends the transformed batch to the history table.
///
/// The empty outcome returns before a connection is opened — nothing to
/// load is the pipeline's defined success path, not an error. The table
/// is append-only; this stage never updates or deletes rows.
pub async fn load(database_url: &str, outcome: TransformOutcome) -> Result<(), LoadError> {
    let events = match outcome {
        TransformOutcome::Empty => {
            info!("Nothing to load; skipping database write.");
            return Ok(());
        }
        TransformOutcome::Populated(events) => events,
    };

    info!("Loading {} rows...", events.len());

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    for chunk in events.chunks(INSERT_BATCH_SIZE) {
        insert_query(chunk).build().execute(&pool).await?;
    }

    info!("Data load complete.");
    Ok(())
}

/// Builds one multi-row INSERT for a chunk of events, binding cells in
/// table column order.
fn insert_query(chunk: &[PlayEvent]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(INSERT_PREFIX);

    builder.push_values(chunk, |mut b, event| {
        b.push_bind(event.song_name.as_str())
            .push_bind(event.artist_names.as_str())
            .push_bind(event.popularity as i32)
            .push_bind(event.played_at.naive_utc())
            .push_bind(event.popularity_category.as_str());
    });

    builder
}
