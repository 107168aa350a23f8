#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Borough boundary and aggregate count types.
//!
//! Boundaries are the polygons the heatmap colours in; the count types are
//! the grouped results the chart builders turn into figures. They are
//! independent of how the crime table itself is stored.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};

/// A named borough polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct BoroughBoundary {
    /// Borough name; joins against `BoroughName` in the crime table.
    pub name: String,
    /// `Polygon` or `MultiPolygon` geometry.
    pub geometry: Geometry,
}

/// All borough boundaries loaded at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoroughBoundaries {
    boundaries: Vec<BoroughBoundary>,
}

impl BoroughBoundaries {
    /// Wraps parsed boundaries.
    #[must_use]
    pub const fn new(boundaries: Vec<BoroughBoundary>) -> Self {
        Self { boundaries }
    }

    /// The boundaries in file order.
    #[must_use]
    pub fn boundaries(&self) -> &[BoroughBoundary] {
        &self.boundaries
    }

    /// Number of boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether no boundaries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Whether a boundary with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.boundaries.iter().any(|b| b.name == name)
    }

    /// Rebuilds a `FeatureCollection` with a `name` property per feature,
    /// the shape the choropleth's `properties.name` key expects.
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .boundaries
            .iter()
            .map(|b| {
                let mut properties = JsonObject::new();
                properties.insert(
                    "name".to_string(),
                    serde_json::Value::String(b.name.clone()),
                );
                Feature {
                    bbox: None,
                    geometry: Some(b.geometry.clone()),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Total crime count for one borough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoroughCount {
    /// Borough name.
    pub borough: String,
    /// Summed count.
    pub count: u64,
}

/// Count of offences in a single major category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Major category name.
    pub category: String,
    /// Summed count.
    pub count: u64,
}

/// A time-series data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    /// Month label (e.g. `"201904"`).
    pub month: String,
    /// Summed count for the month.
    pub count: u64,
}

/// Monthly counts for one subcategory of a major category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategorySeries {
    /// Subcategory name.
    pub subcategory: String,
    /// Points ordered by month label.
    pub points: Vec<MonthCount>,
}
