//! Figure builders for the four dashboard charts.

use chrono::NaiveDate;
use safecity_analytics_models::figure::{
    Axis, ChoroplethTrace, ColorBar, Figure, Font, LatLon, Layout, LineTrace, MapView, Margin,
    PieTrace, Title, Trace,
};
use safecity_crime_models::CrimeTable;
use safecity_geography_models::{
    BoroughBoundaries, CategoryCount, MonthCount, SubcategorySeries,
};

use crate::aggregate::borough_totals;

/// Placeholder message when the heatmap is missing either input.
pub const HEATMAP_ERROR_MESSAGE: &str = "Error: No data available";

/// Initial heatmap centre (central London).
pub const LONDON: LatLon = LatLon {
    lat: 51.5074,
    lon: -0.1278,
};

const HEATMAP_ZOOM: f64 = 9.0;
const PANEL_BACKGROUND: &str = "#f8f9fa";
const PANEL_FONT: &str = "Arial, sans-serif";

/// Choropleth of total crime per borough.
///
/// Falls back to a placeholder when either the table or the boundaries
/// failed to load.
#[must_use]
pub fn heatmap_figure(
    table: Option<&CrimeTable>,
    boundaries: Option<&BoroughBoundaries>,
) -> Figure {
    let (Some(table), Some(boundaries)) = (table, boundaries) else {
        return Figure::placeholder(HEATMAP_ERROR_MESSAGE);
    };

    let totals = match borough_totals(table) {
        Ok(totals) => totals,
        Err(e) => {
            log::error!("Failed to total crime per borough: {e}");
            return Figure::placeholder(HEATMAP_ERROR_MESSAGE);
        }
    };
    for unmatched in totals.iter().filter(|t| !boundaries.contains(&t.borough)) {
        log::debug!("No boundary for borough {}", unmatched.borough);
    }

    let (locations, z) = totals.into_iter().map(|t| (t.borough, t.count)).unzip();

    Figure {
        data: vec![Trace::Choroplethmap(ChoroplethTrace {
            geojson: boundaries.to_feature_collection(),
            locations,
            z,
            featureidkey: "properties.name".to_string(),
            colorscale: "Reds".to_string(),
            colorbar: Some(ColorBar {
                title: Title::new("Crime Count"),
            }),
            hovertemplate: Some("<b>%{location}</b><br>Crime Count: %{z}<extra></extra>".to_string()),
        })],
        layout: Layout {
            title: Some(Title::new("Crime Heatmap of London")),
            margin: Some(Margin {
                r: 0,
                t: 30,
                l: 0,
                b: 0,
            }),
            map: Some(MapView {
                style: "carto-positron".to_string(),
                center: LONDON,
                zoom: HEATMAP_ZOOM,
            }),
            ..Layout::default()
        },
    }
}

/// Overall monthly trend for a borough.
#[must_use]
pub fn trend_figure(borough: &str, points: &[MonthCount]) -> Figure {
    let (x, y) = split_points(points);
    Figure {
        data: vec![Trace::Scatter(LineTrace::new(x, y, None))],
        layout: line_layout(&format!("Overall Crime Trend in {borough} Over Time")),
    }
}

/// Share of each major category in a borough.
#[must_use]
pub fn pie_figure(borough: &str, categories: &[CategoryCount]) -> Figure {
    let (labels, values) = categories
        .iter()
        .map(|c| (c.category.clone(), c.count))
        .unzip();

    Figure {
        data: vec![Trace::Pie(PieTrace { labels, values })],
        layout: Layout {
            title: Some(Title::new(&format!(
                "Count of Each Major Crime Type in {borough}"
            ))),
            ..panel_layout()
        },
    }
}

/// One line per subcategory of `major_category` in a borough.
#[must_use]
pub fn breakdown_figure(borough: &str, major_category: &str, series: &[SubcategorySeries]) -> Figure {
    let data = series
        .iter()
        .map(|s| {
            let (x, y) = split_points(&s.points);
            Trace::Scatter(LineTrace::new(x, y, Some(s.subcategory.clone())))
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            showlegend: Some(true),
            ..line_layout(&format!(
                "Crime Trend Over Time for {major_category} in {borough}"
            ))
        },
    }
}

/// The breakdown chart before a category is chosen: no traces at all.
#[must_use]
pub fn empty_line_figure() -> Figure {
    Figure::default()
}

/// Renders `YYYYMM` labels as `YYYY-MM` so the browser plots a date axis.
/// Anything else is returned unchanged.
#[must_use]
pub fn month_axis_label(month: &str) -> String {
    if month.len() == 6
        && month.bytes().all(|b| b.is_ascii_digit())
        && let Ok(date) = NaiveDate::parse_from_str(&format!("{month}01"), "%Y%m%d")
    {
        return date.format("%Y-%m").to_string();
    }
    month.to_string()
}

fn split_points(points: &[MonthCount]) -> (Vec<String>, Vec<u64>) {
    points
        .iter()
        .map(|p| (month_axis_label(&p.month), p.count))
        .unzip()
}

fn panel_layout() -> Layout {
    Layout {
        plot_bgcolor: Some(PANEL_BACKGROUND.to_string()),
        paper_bgcolor: Some(PANEL_BACKGROUND.to_string()),
        font: Some(Font {
            family: Some(PANEL_FONT.to_string()),
            size: None,
        }),
        ..Layout::default()
    }
}

fn line_layout(title: &str) -> Layout {
    Layout {
        title: Some(Title::new(title)),
        xaxis: Some(Axis {
            title: Some(Title::new("Month")),
            showgrid: Some(true),
            tickangle: Some(-45),
            ..Axis::default()
        }),
        yaxis: Some(Axis {
            title: Some(Title::new("Crime Count")),
            showgrid: Some(true),
            ..Axis::default()
        }),
        ..panel_layout()
    }
}
