#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the `SafeCity` London crime dashboard.
//!
//! Loads the crime table and borough boundaries once at startup, then serves
//! the dashboard page, its static assets, and the JSON endpoints the page
//! calls whenever the user interacts with it. Loaded data is read-only and
//! shared by every worker.

mod handlers;
pub mod interactive;
mod layout;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use safecity_crime_models::CrimeTable;
use safecity_data::paths::{boundaries_path, crime_csv_path};
use safecity_data::{load_boundaries, load_crime_data, melt};
use safecity_geography_models::BoroughBoundaries;

/// Port used when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8050;

/// Bind address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Shared application state.
pub struct AppState {
    /// Long-form crime table, if the CSV loaded.
    pub crime: Option<Arc<CrimeTable>>,
    /// Borough boundaries, if the `GeoJSON` loaded.
    pub boundaries: Option<Arc<BoroughBoundaries>>,
}

impl AppState {
    /// Loads and reshapes both input files from `data_dir`.
    ///
    /// Missing or malformed files are logged and leave the corresponding
    /// field empty; the dashboard then shows its "no data" placeholders.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        log::info!("Loading input data from {}", data_dir.display());

        let crime = melt(load_crime_data(&crime_csv_path(data_dir)));
        match &crime {
            Some(table) => log::info!(
                "Loaded {} crime records across {} boroughs and {} major categories",
                table.len(),
                table.borough_names().map_or(0, |names| names.len()),
                table.major_categories().map_or(0, |names| names.len())
            ),
            None => log::warn!("Crime data unavailable; charts will show placeholders"),
        }

        let boundaries = load_boundaries(&boundaries_path(data_dir));
        match &boundaries {
            Some(b) => log::info!("Loaded {} borough boundaries", b.len()),
            None => log::warn!("Borough boundaries unavailable; heatmap will show a placeholder"),
        }

        Self {
            crime: crime.map(Arc::new),
            boundaries: boundaries.map(Arc::new),
        }
    }
}

/// Directory holding the page's script and stylesheet.
#[must_use]
pub fn static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/boroughs", web::get().to(handlers::boroughs))
            .route("/heatmap", web::get().to(handlers::heatmap))
            .route("/dashboard", web::get().to(handlers::dashboard)),
    );
}

/// Starts the dashboard server.
///
/// Loads the input files from `data_dir`, reads `BIND_ADDR` and `PORT` from
/// the environment, and runs the Actix-Web HTTP server. The caller provides
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(data_dir: &Path) -> std::io::Result<()> {
    let state = web::Data::new(AppState::load(data_dir));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let assets = static_dir();

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", assets.clone()))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_without_files_leaves_state_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(dir.path());
        assert!(state.crime.is_none());
        assert!(state.boundaries.is_none());
    }

    #[test]
    fn load_reshapes_crime_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(crime_csv_path(dir.path())).unwrap();
        writeln!(file, "MajorText,MinorText,BoroughName,201901,201902").unwrap();
        writeln!(file, "Theft,Other Theft,Camden,3,4").unwrap();
        writeln!(file, "Burglary,Residential,Hackney,1,0").unwrap();
        drop(file);

        let state = AppState::load(dir.path());
        let crime = state.crime.unwrap();
        assert_eq!(crime.len(), 4);
        assert_eq!(crime.borough_names().unwrap(), ["Camden", "Hackney"]);
        assert!(state.boundaries.is_none());
    }

    #[test]
    fn static_assets_ship_with_the_crate() {
        assert!(static_dir().join("dashboard.js").is_file());
        assert!(static_dir().join("dashboard.css").is_file());
    }
}
