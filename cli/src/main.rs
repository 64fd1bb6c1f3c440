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

use dotenvy::dotenv;
use history_core::{run, Config};
use std::process;

// One invocation, one ETL pass. No flags: everything comes from the
// environment, so a scheduler can re-run the binary as-is.
#[tokio::main]
async fn main() {
    env_logger::init();

    if dotenv().is_err() {
        // Silently ignore
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    println!("Starting recently-played ETL run...");

    match run(&config).await {
        Ok(()) => {
            println!("ETL run finished.");
        }
        Err(e) => {
            eprintln!();
            eprintln!("ETL run failed: {}", e);
            process::exit(1);
        }
    }
}
