#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregations and chart builders behind the dashboard callbacks.
//!
//! Every function here is pure: it takes the read-only long-form table and
//! the selection sent by the browser and returns counts or figures. Gaps in
//! the selection are reported as [`SelectionError`] internally and always
//! end up as hidden or empty outputs, never as a failed request.

pub mod aggregate;
pub mod charts;
pub mod dashboard;

use safecity_analytics_models::Selection;
use thiserror::Error;

pub use dashboard::update_dashboard;

/// A selection that is not complete enough for the requested output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No borough has been chosen.
    #[error("No borough selected")]
    MissingSelection,

    /// No major category has been chosen for the breakdown.
    #[error("No major crime category selected")]
    MissingCategory,
}

/// The selected borough.
///
/// # Errors
///
/// Returns [`SelectionError::MissingSelection`] if no borough is selected.
pub fn selected_borough(selection: &Selection) -> Result<&str, SelectionError> {
    selection
        .borough
        .as_deref()
        .ok_or(SelectionError::MissingSelection)
}

/// The selected major category.
///
/// # Errors
///
/// Returns [`SelectionError::MissingCategory`] if no category is selected.
pub fn selected_category(selection: &Selection) -> Result<&str, SelectionError> {
    selection
        .major_category
        .as_deref()
        .ok_or(SelectionError::MissingCategory)
}
