#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the `SafeCity` server.
//!
//! Query parameters arrive exactly as the browser script sends them; they are
//! normalised into the analytics request types here so the handlers stay
//! thin.

use safecity_analytics_models::{DashboardRequest, Selection, Trigger};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether the crime table loaded at startup.
    pub crime_data_loaded: bool,
    /// Whether the borough boundaries loaded at startup.
    pub boundaries_loaded: bool,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapQueryParams {
    /// Navigate button click count. The heatmap does not depend on it, but
    /// the page sends it on every refresh.
    pub n_clicks: Option<u32>,
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Navigate button click count.
    pub n_clicks: Option<u32>,
    /// Selected borough.
    pub borough: Option<String>,
    /// Selected major crime category.
    pub major_category: Option<String>,
    /// Control that fired the update (`navigate` or `majorCategory`).
    pub trigger: Option<Trigger>,
}

impl From<DashboardQueryParams> for DashboardRequest {
    fn from(params: DashboardQueryParams) -> Self {
        Self {
            n_clicks: params.n_clicks.unwrap_or(0),
            selection: Selection::new(params.borough, params.major_category),
            trigger: params.trigger.unwrap_or_default(),
        }
    }
}
