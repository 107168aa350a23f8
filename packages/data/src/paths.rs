#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the dashboard's input data.
//!
//! All paths are relative to the data directory, which defaults to the
//! project root's `data/` directory and can be redirected with the
//! `SAFECITY_DATA_DIR` environment variable.

use std::path::{Path, PathBuf};

/// Environment variable that overrides [`default_data_dir`].
pub const DATA_DIR_ENV: &str = "SAFECITY_DATA_DIR";

/// File name of the wide crime table.
pub const CRIME_CSV_FILE: &str = "crime_cleaned.csv";

/// File name of the borough boundary collection.
pub const BOUNDARIES_FILE: &str = "london-boroughs_1179.geojson";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`. Falls back to the
/// manifest directory itself if it is not nested two levels deep.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.ancestors().nth(2).unwrap_or(manifest).to_path_buf()
}

/// Returns the default `data/` directory path.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the data directory, honouring `SAFECITY_DATA_DIR` when set.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(default_data_dir, PathBuf::from)
}

/// Returns the crime CSV path inside `data_dir`.
#[must_use]
pub fn crime_csv_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CRIME_CSV_FILE)
}

/// Returns the boundaries `GeoJSON` path inside `data_dir`.
#[must_use]
pub fn boundaries_path(data_dir: &Path) -> PathBuf {
    data_dir.join(BOUNDARIES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_files_live_in_data_dir() {
        let dir = Path::new("/srv/safecity");
        assert_eq!(
            crime_csv_path(dir),
            PathBuf::from("/srv/safecity/crime_cleaned.csv")
        );
        assert_eq!(
            boundaries_path(dir),
            PathBuf::from("/srv/safecity/london-boroughs_1179.geojson")
        );
    }

    #[test]
    fn default_data_dir_is_under_project_root() {
        assert!(default_data_dir().starts_with(project_root()));
        assert!(default_data_dir().ends_with("data"));
    }
}
