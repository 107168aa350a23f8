#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection, dashboard update, and chart figure types.
//!
//! The dashboard's selection state lives in the browser and is sent with
//! every request; these types describe that request and the update the
//! server answers with.

pub mod figure;

use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

pub use figure::Figure;

/// The current borough and major-category choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected borough, if any.
    pub borough: Option<String>,
    /// Selected major crime category, if any.
    pub major_category: Option<String>,
}

impl Selection {
    /// Builds a selection, treating blank strings as "nothing selected".
    #[must_use]
    pub fn new(borough: Option<String>, major_category: Option<String>) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            borough: present(borough),
            major_category: present(major_category),
        }
    }
}

/// Which control caused a dashboard update.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Trigger {
    /// The "Go to Dashboard" button, which applies the borough selection.
    #[default]
    Navigate,
    /// The major-category dropdown changed.
    MajorCategory,
}

/// Where the dashboard is in its selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardPhase {
    /// No borough applied; only the heatmap is visible.
    Start,
    /// Trend and pie are visible and the category dropdown is populated.
    BoroughSelected,
    /// The breakdown chart is visible as well.
    CategorySelected,
}

/// One dashboard update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardRequest {
    /// Times the navigate button has been pressed.
    pub n_clicks: u32,
    /// Current selection.
    pub selection: Selection,
    /// Control that fired this request.
    pub trigger: Trigger,
}

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// Displayed text.
    pub label: String,
    /// Submitted value.
    pub value: String,
}

impl DropdownOption {
    /// An option whose label and value are the same text.
    #[must_use]
    pub fn same(text: &str) -> Self {
        Self {
            label: text.to_string(),
            value: text.to_string(),
        }
    }
}

/// CSS `display` value for a dashboard element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[serde(rename = "none")]
    Hidden,
    #[serde(rename = "block")]
    Shown,
}

/// Inline style applied to a dashboard element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Element visibility.
    pub display: Visibility,
}

impl Style {
    /// `display: none`.
    pub const HIDDEN: Self = Self {
        display: Visibility::Hidden,
    };

    /// `display: block`.
    pub const SHOWN: Self = Self {
        display: Visibility::Shown,
    };
}

/// An output that is either replaced or left as the browser has it.
///
/// Serializes as the inner value; [`Update::NoUpdate`] fields are skipped
/// so an absent key means "keep what you have".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Update<T> {
    /// Leave the current value.
    #[default]
    NoUpdate,
    /// Replace it.
    Set(T),
}

impl<T> Update<T> {
    /// Whether this output should be left untouched.
    pub const fn is_no_update(&self) -> bool {
        matches!(self, Self::NoUpdate)
    }

    /// The new value, if one was set.
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::NoUpdate => None,
            Self::Set(v) => Some(v),
        }
    }
}

impl<T: Serialize> Serialize for Update<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoUpdate => serializer.serialize_unit(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

/// Everything the dashboard callback changes in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    /// Selection phase after this update.
    pub phase: DashboardPhase,
    /// Container holding the trend, pie, dropdown, and breakdown.
    pub graph_container_style: Style,
    #[serde(skip_serializing_if = "Update::is_no_update")]
    pub trend_figure: Update<Figure>,
    #[serde(skip_serializing_if = "Update::is_no_update")]
    pub pie_figure: Update<Figure>,
    pub pie_style: Style,
    #[serde(skip_serializing_if = "Update::is_no_update")]
    pub breakdown_figure: Update<Figure>,
    /// Categories offered for the selected borough.
    pub major_category_options: Vec<DropdownOption>,
    pub major_category_style: Style,
    /// `Set(None)` clears the dropdown.
    #[serde(skip_serializing_if = "Update::is_no_update")]
    pub major_category_value: Update<Option<String>>,
}

impl DashboardUpdate {
    /// The update for "nothing to show": everything hidden, options emptied,
    /// figures and the category value left alone.
    #[must_use]
    pub const fn hidden() -> Self {
        Self {
            phase: DashboardPhase::Start,
            graph_container_style: Style::HIDDEN,
            trend_figure: Update::NoUpdate,
            pie_figure: Update::NoUpdate,
            pie_style: Style::HIDDEN,
            breakdown_figure: Update::NoUpdate,
            major_category_options: Vec::new(),
            major_category_style: Style::HIDDEN,
            major_category_value: Update::NoUpdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selections_are_treated_as_absent() {
        let selection = Selection::new(Some("  ".to_string()), Some(String::new()));
        assert_eq!(selection, Selection::default());

        let selection = Selection::new(Some("Camden".to_string()), Some("Theft".to_string()));
        assert_eq!(selection.borough.as_deref(), Some("Camden"));
        assert_eq!(selection.major_category.as_deref(), Some("Theft"));
    }

    #[test]
    fn trigger_parses_query_values() {
        assert_eq!("navigate".parse::<Trigger>(), Ok(Trigger::Navigate));
        assert_eq!(
            "majorCategory".parse::<Trigger>(),
            Ok(Trigger::MajorCategory)
        );
        assert!("nope".parse::<Trigger>().is_err());
    }

    #[test]
    fn hidden_update_skips_untouched_outputs() {
        let json = serde_json::to_value(DashboardUpdate::hidden()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(json["phase"], "START");
        assert_eq!(json["graphContainerStyle"]["display"], "none");
        assert_eq!(json["majorCategoryOptions"], serde_json::json!([]));
        assert!(!object.contains_key("trendFigure"));
        assert!(!object.contains_key("majorCategoryValue"));
    }

    #[test]
    fn cleared_category_serializes_as_null() {
        let update = DashboardUpdate {
            major_category_value: Update::Set(None),
            ..DashboardUpdate::hidden()
        };
        let json = serde_json::to_value(update).unwrap();
        assert!(json.as_object().unwrap().contains_key("majorCategoryValue"));
        assert!(json["majorCategoryValue"].is_null());
    }
}
