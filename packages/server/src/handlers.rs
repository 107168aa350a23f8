//! HTTP handler functions for the `SafeCity` dashboard.

use actix_web::{HttpResponse, web};
use safecity_analytics::aggregate::borough_options;
use safecity_analytics::charts::heatmap_figure;
use safecity_analytics::update_dashboard;
use safecity_analytics_models::DashboardRequest;
use safecity_server_models::{ApiHealth, DashboardQueryParams, HeatmapQueryParams};

use crate::AppState;
use crate::layout::render_page;

/// `GET /`
///
/// The dashboard page with the borough dropdown pre-populated.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    let options = borough_options(state.crime.as_deref());
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&options))
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        crime_data_loaded: state.crime.is_some(),
        boundaries_loaded: state.boundaries.is_some(),
    })
}

/// `GET /api/boroughs`
pub async fn boroughs(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(borough_options(state.crime.as_deref()))
}

/// `GET /api/heatmap`
///
/// Returns the borough choropleth, or an error placeholder when either input
/// file failed to load.
pub async fn heatmap(
    state: web::Data<AppState>,
    params: web::Query<HeatmapQueryParams>,
) -> HttpResponse {
    log::debug!("Heatmap requested (nClicks={:?})", params.n_clicks);
    HttpResponse::Ok().json(heatmap_figure(
        state.crime.as_deref(),
        state.boundaries.as_deref(),
    ))
}

/// `GET /api/dashboard`
///
/// Recomputes every dependent dashboard output for the current selection.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let request = DashboardRequest::from(params.into_inner());
    log::debug!(
        "Dashboard update: trigger={} borough={:?} category={:?}",
        request.trigger,
        request.selection.borough,
        request.selection.major_category
    );
    HttpResponse::Ok().json(update_dashboard(state.crime.as_deref(), &request))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use geojson::{Geometry, Value};
    use safecity_crime_models::{CrimeRecord, CrimeTable};
    use safecity_geography_models::{BoroughBoundaries, BoroughBoundary};

    use crate::{AppState, configure};

    fn record(borough: &str, major: &str, minor: &str, month: &str, count: u64) -> CrimeRecord {
        CrimeRecord {
            borough_name: borough.to_string(),
            major_crime_category: major.to_string(),
            crime_subcategory: minor.to_string(),
            month: month.to_string(),
            crime_count: count,
        }
    }

    fn loaded_state() -> AppState {
        let crime = CrimeTable::from_records(&[
            record("Camden", "Theft", "Other Theft", "201901", 30),
            record("Camden", "Theft", "Other Theft", "201902", 20),
            record("Camden", "Burglary", "Residential", "201901", 10),
            record("Camden", "Burglary", "Residential", "201902", 12),
            record("Hackney", "Burglary", "Residential", "201901", 7),
            record("Hackney", "Burglary", "Residential", "201902", 8),
        ])
        .unwrap();
        let boundaries = BoroughBoundaries::new(vec![BoroughBoundary {
            name: "Camden".to_string(),
            geometry: Geometry::new(Value::Polygon(vec![vec![
                vec![-0.2, 51.5],
                vec![-0.1, 51.5],
                vec![-0.1, 51.6],
                vec![-0.2, 51.5],
            ]])),
        }]);
        AppState {
            crime: Some(Arc::new(crime)),
            boundaries: Some(Arc::new(boundaries)),
        }
    }

    const fn empty_state() -> AppState {
        AppState {
            crime: None,
            boundaries: None,
        }
    }

    async fn get_json(state: AppState, uri: &str) -> serde_json::Value {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(state))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_and_read_body_json(&app, req).await
    }

    #[actix_web::test]
    async fn health_reports_what_loaded() {
        let json = get_json(loaded_state(), "/api/health").await;
        assert_eq!(json["healthy"], true);
        assert_eq!(json["crimeDataLoaded"], true);
        assert_eq!(json["boundariesLoaded"], true);

        let json = get_json(empty_state(), "/api/health").await;
        assert_eq!(json["crimeDataLoaded"], false);
        assert_eq!(json["boundariesLoaded"], false);
    }

    #[actix_web::test]
    async fn boroughs_fall_back_to_placeholder_option() {
        let json = get_json(loaded_state(), "/api/boroughs").await;
        assert_eq!(
            json,
            serde_json::json!([
                {"label": "Camden", "value": "Camden"},
                {"label": "Hackney", "value": "Hackney"},
            ])
        );

        let json = get_json(empty_state(), "/api/boroughs").await;
        assert_eq!(
            json,
            serde_json::json!([{"label": "No data available", "value": ""}])
        );
    }

    #[actix_web::test]
    async fn heatmap_is_a_choropleth_or_an_error_placeholder() {
        let json = get_json(loaded_state(), "/api/heatmap?nClicks=0").await;
        assert_eq!(json["data"][0]["type"], "choroplethmap");
        assert_eq!(json["data"][0]["locations"], serde_json::json!(["Camden", "Hackney"]));

        let json = get_json(empty_state(), "/api/heatmap").await;
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(
            json["layout"]["annotations"][0]["text"],
            "Error: No data available"
        );
    }

    #[actix_web::test]
    async fn dashboard_hidden_before_navigation() {
        let json = get_json(loaded_state(), "/api/dashboard?nClicks=0&borough=Camden").await;
        assert_eq!(json["phase"], "START");
        assert_eq!(json["graphContainerStyle"]["display"], "none");
        assert!(json.get("trendFigure").is_none());
    }

    #[actix_web::test]
    async fn dashboard_navigate_shows_borough_charts_and_clears_category() {
        let json = get_json(
            loaded_state(),
            "/api/dashboard?nClicks=1&borough=Camden&majorCategory=Theft&trigger=navigate",
        )
        .await;
        assert_eq!(json["phase"], "BOROUGH_SELECTED");
        assert_eq!(json["graphContainerStyle"]["display"], "block");
        assert_eq!(json["trendFigure"]["data"][0]["y"], serde_json::json!([40, 32]));
        assert_eq!(json["breakdownFigure"]["data"], serde_json::json!([]));
        assert!(json["majorCategoryValue"].is_null());
        assert_eq!(
            json["majorCategoryOptions"],
            serde_json::json!([
                {"label": "Theft", "value": "Theft"},
                {"label": "Burglary", "value": "Burglary"},
            ])
        );
    }

    #[actix_web::test]
    async fn dashboard_category_change_draws_breakdown() {
        let json = get_json(
            loaded_state(),
            "/api/dashboard?nClicks=1&borough=Camden&majorCategory=Theft&trigger=majorCategory",
        )
        .await;
        assert_eq!(json["phase"], "CATEGORY_SELECTED");
        assert_eq!(json["breakdownFigure"]["data"][0]["name"], "Other Theft");
        assert!(json.get("majorCategoryValue").is_none());
    }

    #[actix_web::test]
    async fn index_prepopulates_boroughs() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(loaded_state()))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains(r#"<option value="Hackney">Hackney</option>"#));
        assert!(page.contains("<title>SafeCity</title>"));
    }
}
