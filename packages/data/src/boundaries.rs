//! Borough boundary loader.
//!
//! Reads a `GeoJSON` `FeatureCollection` and keeps every feature that has
//! a non-empty `properties.name` and a polygonal geometry.

use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use safecity_geography_models::{BoroughBoundaries, BoroughBoundary};

use crate::DataError;

/// Loads borough boundaries from `path`.
///
/// Returns `None` if the file is missing, empty, or not a usable
/// `FeatureCollection`. The cause is logged.
#[must_use]
pub fn load_boundaries(path: &Path) -> Option<BoroughBoundaries> {
    match read_boundaries_file(path) {
        Ok(boundaries) => {
            log::info!(
                "Loaded {} borough boundaries from {}",
                boundaries.len(),
                path.display()
            );
            Some(boundaries)
        }
        Err(e) => {
            log::error!("Failed to load boundaries from {}: {e}", path.display());
            None
        }
    }
}

fn read_boundaries_file(path: &Path) -> Result<BoroughBoundaries, DataError> {
    if !path.is_file() {
        return Err(DataError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(DataError::EmptyFile {
            what: path.display().to_string(),
        });
    }

    parse_boundaries(&text)
}

/// Parses a boundary `FeatureCollection`.
///
/// Features without a name or with a non-polygonal geometry are skipped.
///
/// # Errors
///
/// Returns [`DataError`] if the text is not valid `GeoJSON`, is not a
/// `FeatureCollection`, or contains no usable features.
pub fn parse_boundaries(text: &str) -> Result<BoroughBoundaries, DataError> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(_) => {
            return Err(DataError::UnexpectedGeoJson {
                found: "Feature".to_string(),
            });
        }
        GeoJson::Geometry(_) => {
            return Err(DataError::UnexpectedGeoJson {
                found: "Geometry".to_string(),
            });
        }
    };

    let total = collection.features.len();
    let boundaries: Vec<BoroughBoundary> = collection
        .features
        .into_iter()
        .filter_map(normalize_feature)
        .collect();

    if boundaries.is_empty() {
        return Err(DataError::EmptyFile {
            what: "boundary collection has no named polygon features".to_string(),
        });
    }
    if boundaries.len() < total {
        log::warn!(
            "Skipped {} of {total} boundary features without a name or polygon",
            total - boundaries.len()
        );
    }

    Ok(BoroughBoundaries::new(boundaries))
}

fn normalize_feature(feature: Feature) -> Option<BoroughBoundary> {
    let name = feature
        .property("name")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let geometry = feature.geometry?;
    match geometry.value {
        Value::Polygon(_) | Value::MultiPolygon(_) => Some(BoroughBoundary { name, geometry }),
        _ => {
            log::debug!("Boundary {name} has a non-polygon geometry");
            None
        }
    }
}
