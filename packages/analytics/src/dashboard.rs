//! The combined dashboard callback.
//!
//! One request carries the click count, the selection, and the control that
//! fired. The answer updates every dependent output at once: container and
//! pie visibility, the trend/pie/breakdown figures, and the category
//! dropdown's options, visibility, and value.

use polars::prelude::PolarsResult;
use safecity_analytics_models::{
    DashboardPhase, DashboardRequest, DashboardUpdate, Figure, Style, Trigger, Update,
};
use safecity_crime_models::CrimeTable;

use crate::aggregate::{
    category_totals, major_category_options, monthly_totals, subcategory_series,
};
use crate::charts::{breakdown_figure, empty_line_figure, pie_figure, trend_figure};
use crate::{selected_borough, selected_category};

/// Recomputes the dashboard for one request.
///
/// Nothing is shown until the navigate button has been pressed with a
/// borough selected and data loaded. Pressing it (re)applies the borough and
/// clears the category; picking a category fills in the breakdown.
#[must_use]
pub fn update_dashboard(
    table: Option<&CrimeTable>,
    request: &DashboardRequest,
) -> DashboardUpdate {
    if request.n_clicks == 0 {
        return DashboardUpdate::hidden();
    }
    let Some(table) = table else {
        log::debug!("Dashboard requested without crime data");
        return DashboardUpdate::hidden();
    };
    let borough = match selected_borough(&request.selection) {
        Ok(borough) => borough,
        Err(e) => {
            log::debug!("Dashboard hidden: {e}");
            return DashboardUpdate::hidden();
        }
    };

    match borough_panels(table, borough, request) {
        Ok(update) => update,
        Err(e) => {
            log::error!("Failed to aggregate crime data for {borough}: {e}");
            DashboardUpdate::hidden()
        }
    }
}

fn borough_panels(
    table: &CrimeTable,
    borough: &str,
    request: &DashboardRequest,
) -> PolarsResult<DashboardUpdate> {
    let records = table.for_borough(borough)?;
    let (phase, breakdown, category_value) = breakdown_for(borough, &records, request)?;

    Ok(DashboardUpdate {
        phase,
        graph_container_style: Style::SHOWN,
        trend_figure: Update::Set(trend_figure(borough, &monthly_totals(&records)?)),
        pie_figure: Update::Set(pie_figure(borough, &category_totals(&records)?)),
        pie_style: Style::SHOWN,
        breakdown_figure: Update::Set(breakdown),
        major_category_options: major_category_options(&records)?,
        major_category_style: Style::SHOWN,
        major_category_value: category_value,
    })
}

fn breakdown_for(
    borough: &str,
    records: &CrimeTable,
    request: &DashboardRequest,
) -> PolarsResult<(DashboardPhase, Figure, Update<Option<String>>)> {
    Ok(match request.trigger {
        Trigger::Navigate => (
            DashboardPhase::BoroughSelected,
            empty_line_figure(),
            Update::Set(None),
        ),
        Trigger::MajorCategory => match selected_category(&request.selection) {
            Ok(major) => (
                DashboardPhase::CategorySelected,
                breakdown_figure(borough, major, &subcategory_series(records, major)?),
                Update::NoUpdate,
            ),
            Err(e) => {
                log::debug!("Breakdown cleared: {e}");
                (
                    DashboardPhase::BoroughSelected,
                    empty_line_figure(),
                    Update::NoUpdate,
                )
            }
        },
    })
}
