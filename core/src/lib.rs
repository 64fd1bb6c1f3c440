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

pub mod auth;
pub mod config;
pub mod extract;
pub mod load;
pub mod models;
pub mod pipeline;
pub mod transform;

// Re-export key items for convenience
pub use config::Config;
pub use models::{PlayEvent, PlayRow, PopularityCategory, TransformOutcome};
pub use pipeline::{run, PipelineError};
