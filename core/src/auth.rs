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

use crate::config::Config as AppConfig;
use rspotify::{prelude::*, scopes, AuthCodeSpotify, Config, Credentials, OAuth};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Spotify authentication failed: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Initializes and authenticates a Spotify client using the Authorization Code Flow.
///
/// Credentials and the redirect URI come from the resolved [`AppConfig`],
/// never from ambient environment reads. The requested scopes cover the
/// recently-played history and the user's library:
/// - user-read-recently-played: the play history this job extracts.
/// - user-library-read: saved-track metadata referenced by history items.
///
/// If a valid token is not cached, it will prompt the user (via stdout) to visit a URL
/// to authorize the application; the token is cached and refreshed afterwards, so
/// scheduled runs stay non-interactive.
pub async fn get_spotify_client(cfg: &AppConfig) -> Result<AuthCodeSpotify, AuthError> {
    let creds = Credentials::new(&cfg.client_id, &cfg.client_secret);

    let oauth = OAuth {
        redirect_uri: cfg.redirect_uri.clone(),
        scopes: scopes!("user-library-read", "user-read-recently-played"),
        ..Default::default()
    };

    // `token_cached: true` enables saving the token to a file (default: .spotify_token_cache.json).
    let config = Config {
        token_cached: true,
        token_refreshing: true,
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(creds, oauth, config);

    let url = spotify.get_authorize_url(false)?;

    // This method from the `cli` feature of rspotify handles the interaction:
    // 1. Tries to open the URL in the default browser.
    // 2. If that fails, prints the URL to stdout.
    // 3. Waits for the local redirect URI to be hit, or for pasted input.
    spotify.prompt_for_token(&url).await?;

    Ok(spotify)
}
