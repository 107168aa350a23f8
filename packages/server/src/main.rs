#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `SafeCity` dashboard server.
//!
//! ```text
//! safecity_server [--data-dir <DIR>] [--interactive]
//! ```
//!
//! `BIND_ADDR` and `PORT` choose the listen address (default
//! `127.0.0.1:8050`); `SAFECITY_DATA_DIR` is used when `--data-dir` is not
//! given.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "safecity_server",
    about = "Serve the SafeCity London crime dashboard"
)]
struct Cli {
    /// Directory containing `crime_cleaned.csv` and the borough `GeoJSON`
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Prompt for bind address, port, and data directory before starting
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(safecity_data::paths::data_dir);

    if cli.interactive {
        return safecity_server::interactive::run(data_dir).await;
    }

    safecity_server::run_server(&data_dir).await
}
