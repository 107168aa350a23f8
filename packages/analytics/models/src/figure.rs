//! Chart figure specifications.
//!
//! A [`Figure`] serializes to the `{ "data": [...], "layout": {...} }`
//! shape that `Plotly.react` consumes, so the browser renders exactly what
//! the server built. Only the attributes the dashboard uses are modelled;
//! optional ones are omitted from the JSON when unset.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Message shown by [`Figure::no_data`].
pub const NO_DATA_MESSAGE: &str = "No data available";

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Traces, drawn in order.
    pub data: Vec<Trace>,
    /// Titles, axes, and styling.
    pub layout: Layout,
}

impl Figure {
    /// A figure with no traces whose title and centred annotation carry
    /// `message`. Both axes are hidden.
    #[must_use]
    pub fn placeholder(message: &str) -> Self {
        let hidden = Axis {
            visible: Some(false),
            ..Axis::default()
        };
        Self {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title::new(message)),
                xaxis: Some(hidden.clone()),
                yaxis: Some(hidden),
                annotations: vec![Annotation {
                    text: message.to_string(),
                    xref: "paper".to_string(),
                    yref: "paper".to_string(),
                    showarrow: false,
                    font: Some(Font {
                        family: None,
                        size: Some(20),
                    }),
                }],
                ..Layout::default()
            },
        }
    }

    /// The generic "no data" placeholder.
    #[must_use]
    pub fn no_data() -> Self {
        Self::placeholder(NO_DATA_MESSAGE)
    }

    /// Text of the first annotation, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.layout.annotations.first().map(|a| a.text.as_str())
    }
}

/// One trace of a figure, tagged by its Plotly `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Tile-map choropleth.
    Choroplethmap(ChoroplethTrace),
    /// Line series.
    Scatter(LineTrace),
    /// Pie chart.
    Pie(PieTrace),
}

/// Choropleth coloured by a numeric value per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethTrace {
    /// Boundary features.
    pub geojson: FeatureCollection,
    /// Feature identifiers matched against `featureidkey`.
    pub locations: Vec<String>,
    /// Values coloured onto each location.
    pub z: Vec<u64>,
    /// Path to the identifier inside each feature.
    pub featureidkey: String,
    /// Named colour scale.
    pub colorscale: String,
    /// Colour bar settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    /// Hover label template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

/// Colour bar attached to a choropleth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBar {
    /// Colour bar title.
    pub title: Title,
}

/// A line series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTrace {
    /// X values (month labels).
    pub x: Vec<String>,
    /// Y values (counts).
    pub y: Vec<u64>,
    /// Drawing mode; always `"lines"` here.
    pub mode: String,
    /// Legend entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Line shape.
    pub line: LineStyle,
}

impl LineTrace {
    /// A linear line series.
    #[must_use]
    pub fn new(x: Vec<String>, y: Vec<u64>, name: Option<String>) -> Self {
        Self {
            x,
            y,
            mode: "lines".to_string(),
            name,
            line: LineStyle {
                shape: "linear".to_string(),
            },
        }
    }
}

/// Line drawing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Interpolation between points.
    pub shape: String,
}

/// A pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieTrace {
    /// Slice labels.
    pub labels: Vec<String>,
    /// Slice values.
    pub values: Vec<u64>,
}

/// Figure layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// Tile map view for `choroplethmap` traces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

/// A layout or axis title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title text.
    pub text: String,
}

impl Title {
    /// Creates a title from text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Axis options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

/// A text annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation text.
    pub text: String,
    /// X reference frame.
    pub xref: String,
    /// Y reference frame.
    pub yref: String,
    /// Whether to draw an arrow to the anchor.
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// Font options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

/// Tile map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Base map style (e.g. `"carto-positron"`).
    pub style: String,
    /// Initial centre.
    pub center: LatLon,
    /// Initial zoom level.
    pub zoom: f64,
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}
