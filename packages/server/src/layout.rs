//! Server-rendered dashboard page.
//!
//! The page is static apart from the borough dropdown, which is filled in
//! from the loaded table. Everything else is drawn by `static/dashboard.js`
//! from the JSON endpoints.

use safecity_analytics_models::DropdownOption;

/// Plotly bundle providing the `choroplethmap` trace type.
const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const INTERACTIVE_GRAPH_NOTE: &str = "*The graph is interactive. You can zoom in on specific dates using the lasso tool or crop feature.";
const INTERACTIVE_PIE_NOTE: &str =
    "*The pie chart is interactive. Click on the legend to remove a crime type.";

/// Attribution shown at the bottom of the page.
pub const ATTRIBUTION: &str = "Data sourced from the Metropolitan Police Service under the UK Open Government License (OGL v2).";

/// Renders the full dashboard page.
#[must_use]
pub fn render_page(borough_options: &[DropdownOption]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SafeCity</title>
    <link rel="stylesheet" href="/static/dashboard.css">
    <script src="{plotly}" charset="utf-8"></script>
</head>
<body>
    <main class="container">
        <h1 class="title">SafeCity</h1>
        <p class="tagline">A safer London for all!</p>
        <p class="section-label">Frequency of Crime by Borough</p>
        <div id="crime-heatmap" class="graph"></div>
        {borough_select}
        <button id="navigate-button" class="btn" type="button" data-n-clicks="0">Go to Dashboard</button>
        {graph_container}
        {footer}
    </main>
    <script src="/static/dashboard.js"></script>
</body>
</html>"#,
        plotly = PLOTLY_SRC,
        borough_select = render_select(
            "borough-selection",
            "Select a Borough...",
            borough_options,
            false
        ),
        graph_container = render_graph_container(),
        footer = render_footer(),
    )
}

fn render_graph_container() -> String {
    format!(
        r#"<div id="graph-container" style="display: none">
            <div id="crime-trend-graph" class="graph"></div>
            <p class="note">{graph_note}</p>
            <div id="major-crime-pie-chart" class="graph" style="display: none"></div>
            <p class="note">{pie_note}</p>
            <p class="section-label">Below, the time series shows the evolution of each major crime type, segmented further where applicable.</p>
            {category_select}
            <div id="crime-breakdown-graph" class="graph"></div>
            <p class="note">{graph_note}</p>
        </div>"#,
        graph_note = INTERACTIVE_GRAPH_NOTE,
        pie_note = INTERACTIVE_PIE_NOTE,
        category_select = render_select(
            "major-crime-selection",
            "Select a Major Crime Type...",
            &[],
            true
        ),
    )
}

fn render_select(id: &str, placeholder: &str, options: &[DropdownOption], hidden: bool) -> String {
    let style = if hidden { r#" style="display: none""# } else { "" };
    let options: String = options
        .iter()
        .map(|o| {
            format!(
                r#"<option value="{}">{}</option>"#,
                html_escape(&o.value),
                html_escape(&o.label)
            )
        })
        .collect();

    format!(
        r#"<select id="{id}" class="dropdown"{style}>
            <option value="">{placeholder}</option>
            {options}
        </select>"#,
        placeholder = html_escape(placeholder),
    )
}

fn render_footer() -> String {
    format!(r#"<footer class="attribution"><p>{ATTRIBUTION}</p></footer>"#)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
