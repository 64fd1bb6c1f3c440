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

use std::env;
use thiserror::Error;

const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Runtime configuration, resolved once at process start and passed into
/// the stages that need it. Nothing else in the crate reads the
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub database_url: String,
    pub redirect_uri: String,
}

impl Config {
    /// Builds the configuration from process environment variables.
    ///
    /// `CLIENT_ID`, `CLIENT_SECRET` and `DATABASE_URL` are required;
    /// `REDIRECT_URI` falls back to the local callback endpoint the
    /// Spotify app is expected to be registered with.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: require("CLIENT_ID")?,
            client_secret: require("CLIENT_SECRET")?,
            database_url: require("DATABASE_URL")?,
            redirect_uri: env::var("REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
