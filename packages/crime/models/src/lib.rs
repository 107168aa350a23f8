#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime table types for the borough dataset.
//!
//! The published dataset is *wide*: one row per borough/category/subcategory
//! with one count column per month. The dashboard works on the *long* form,
//! one row per identifier tuple and month. Both shapes are polars frames
//! with the column names defined here, so the loader, the reshaper, and the
//! aggregators share one vocabulary.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Borough column.
pub const BOROUGH_COLUMN: &str = "BoroughName";
/// Major category column.
pub const MAJOR_CATEGORY_COLUMN: &str = "MajorCrimeCategory";
/// Subcategory column.
pub const SUBCATEGORY_COLUMN: &str = "CrimeSubcategory";
/// Month label column of the long table.
pub const MONTH_COLUMN: &str = "Month";
/// Count column of the long table.
pub const COUNT_COLUMN: &str = "CrimeCount";

/// The fixed identifier columns of the crime table.
///
/// Parsing accepts both the canonical header and the aliases used by the
/// Metropolitan Police export (`MajorText`, `MinorText`), so renaming
/// happens as a side effect of recognising the column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IdentifierColumn {
    /// Borough the counts belong to.
    #[strum(serialize = "BoroughName")]
    BoroughName,
    /// Top-level offence grouping.
    #[strum(to_string = "MajorCrimeCategory", serialize = "MajorText")]
    MajorCrimeCategory,
    /// Offence type within the major category.
    #[strum(to_string = "CrimeSubcategory", serialize = "MinorText")]
    CrimeSubcategory,
}

impl IdentifierColumn {
    /// Returns all identifier columns in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::BoroughName,
            Self::MajorCrimeCategory,
            Self::CrimeSubcategory,
        ]
    }

    /// Canonical frame column name.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::BoroughName => BOROUGH_COLUMN,
            Self::MajorCrimeCategory => MAJOR_CATEGORY_COLUMN,
            Self::CrimeSubcategory => SUBCATEGORY_COLUMN,
        }
    }

    /// Resolves a raw header cell to an identifier column, applying the
    /// alias renames. Returns `None` for month columns.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        header.trim().parse().ok()
    }
}

/// One long-form row: the count for a single identifier tuple and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CrimeRecord {
    /// Borough name.
    pub borough_name: String,
    /// Major crime category.
    pub major_crime_category: String,
    /// Crime subcategory.
    pub crime_subcategory: String,
    /// Month label as it appeared in the source header (e.g. `"201904"`).
    pub month: String,
    /// Number of offences recorded.
    pub crime_count: u64,
}

/// The crime dataset in wide form.
///
/// The frame holds the three identifier columns followed by one `UInt64`
/// column per month. Identifier tuples are unique.
#[derive(Debug, Clone)]
pub struct WideCrimeTable {
    frame: DataFrame,
    months: Vec<String>,
}

impl WideCrimeTable {
    /// Builds the table from a frame with the identifier columns and the
    /// given month columns.
    ///
    /// Rows sharing an identifier tuple are merged into the first of them by
    /// adding their counts.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if a named column is missing or a month
    /// column cannot be read as an unsigned count.
    pub fn new(frame: DataFrame, months: Vec<String>) -> PolarsResult<Self> {
        let keys: Vec<Expr> = IdentifierColumn::all()
            .iter()
            .map(|c| col(c.column_name()).cast(DataType::String))
            .collect();
        let sums: Vec<Expr> = months
            .iter()
            .map(|m| col(m.as_str()).cast(DataType::UInt64).sum())
            .collect();

        let frame = frame.lazy().group_by_stable(keys).agg(sums).collect()?;

        Ok(Self { frame, months })
    }

    /// Month column labels, in file order.
    #[must_use]
    pub fn months(&self) -> &[String] {
        &self.months
    }

    /// The underlying frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of distinct identifier tuples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// The crime dataset in long form.
///
/// Columns are [`BOROUGH_COLUMN`], [`MAJOR_CATEGORY_COLUMN`],
/// [`SUBCATEGORY_COLUMN`], [`MONTH_COLUMN`] (strings) and [`COUNT_COLUMN`]
/// (`UInt64`).
#[derive(Debug, Clone)]
pub struct CrimeTable {
    frame: DataFrame,
}

impl CrimeTable {
    /// Wraps a long-form frame, selecting the table's columns in order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if a column is missing or has an
    /// incompatible type.
    pub fn new(frame: DataFrame) -> PolarsResult<Self> {
        let frame = frame
            .lazy()
            .select([
                col(BOROUGH_COLUMN).cast(DataType::String),
                col(MAJOR_CATEGORY_COLUMN).cast(DataType::String),
                col(SUBCATEGORY_COLUMN).cast(DataType::String),
                col(MONTH_COLUMN).cast(DataType::String),
                col(COUNT_COLUMN).cast(DataType::UInt64),
            ])
            .collect()?;
        Ok(Self { frame })
    }

    /// Builds a table from individual records.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the frame cannot be assembled.
    pub fn from_records(records: &[CrimeRecord]) -> PolarsResult<Self> {
        let text = |name: &str, value: fn(&CrimeRecord) -> &str| {
            Column::new(
                name.into(),
                records
                    .iter()
                    .map(|r| value(r).to_string())
                    .collect::<Vec<String>>(),
            )
        };

        let frame = DataFrame::new(vec![
            text(BOROUGH_COLUMN, |r| r.borough_name.as_str()),
            text(MAJOR_CATEGORY_COLUMN, |r| r.major_crime_category.as_str()),
            text(SUBCATEGORY_COLUMN, |r| r.crime_subcategory.as_str()),
            text(MONTH_COLUMN, |r| r.month.as_str()),
            Column::new(
                COUNT_COLUMN.into(),
                records.iter().map(|r| r.crime_count).collect::<Vec<u64>>(),
            ),
        ])?;

        Ok(Self { frame })
    }

    /// The underlying frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// All records, in frame order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if a column has an unexpected type.
    pub fn records(&self) -> PolarsResult<Vec<CrimeRecord>> {
        let boroughs = string_values(&self.frame, BOROUGH_COLUMN)?;
        let majors = string_values(&self.frame, MAJOR_CATEGORY_COLUMN)?;
        let subcategories = string_values(&self.frame, SUBCATEGORY_COLUMN)?;
        let months = string_values(&self.frame, MONTH_COLUMN)?;
        let counts = count_values(&self.frame, COUNT_COLUMN)?;

        Ok(boroughs
            .into_iter()
            .zip(majors)
            .zip(subcategories)
            .zip(months)
            .zip(counts)
            .map(
                |((((borough_name, major_crime_category), crime_subcategory), month), crime_count)| {
                    CrimeRecord {
                        borough_name,
                        major_crime_category,
                        crime_subcategory,
                        month,
                        crime_count,
                    }
                },
            )
            .collect())
    }

    /// Records belonging to a single borough, in table order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the filter fails.
    pub fn for_borough(&self, borough: &str) -> PolarsResult<Self> {
        self.filtered(col(BOROUGH_COLUMN).eq(lit(borough)))
    }

    /// Records in a single major category, in table order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the filter fails.
    pub fn for_major_category(&self, major_category: &str) -> PolarsResult<Self> {
        self.filtered(col(MAJOR_CATEGORY_COLUMN).eq(lit(major_category)))
    }

    /// Distinct borough names in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the column cannot be read.
    pub fn borough_names(&self) -> PolarsResult<Vec<String>> {
        self.distinct(BOROUGH_COLUMN)
    }

    /// Distinct major categories in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the column cannot be read.
    pub fn major_categories(&self) -> PolarsResult<Vec<String>> {
        self.distinct(MAJOR_CATEGORY_COLUMN)
    }

    fn filtered(&self, predicate: Expr) -> PolarsResult<Self> {
        let frame = self.frame.clone().lazy().filter(predicate).collect()?;
        Ok(Self { frame })
    }

    fn distinct(&self, column: &str) -> PolarsResult<Vec<String>> {
        let unique = self
            .frame
            .clone()
            .lazy()
            .select([col(column).unique_stable()])
            .collect()?;
        string_values(&unique, column)
    }
}

/// Reads a string column into owned values. Nulls become empty strings.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the column is missing or not a string
/// column.
pub fn string_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    Ok(frame
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Reads a count column as `u64`. Nulls become zero.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the column is missing or cannot be cast.
pub fn count_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<u64>> {
    let counts = frame.column(name)?.cast(&DataType::UInt64)?;
    Ok(counts.u64()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(borough: &str, major: &str, month: &str, count: u64) -> CrimeRecord {
        CrimeRecord {
            borough_name: borough.to_string(),
            major_crime_category: major.to_string(),
            crime_subcategory: "Other".to_string(),
            month: month.to_string(),
            crime_count: count,
        }
    }

    fn wide_frame(rows: &[(&str, &str, &str, u64, u64)]) -> DataFrame {
        let boroughs: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
        let majors: Vec<String> = rows.iter().map(|r| r.1.to_string()).collect();
        let minors: Vec<String> = rows.iter().map(|r| r.2.to_string()).collect();
        DataFrame::new(vec![
            Column::new(BOROUGH_COLUMN.into(), boroughs),
            Column::new(MAJOR_CATEGORY_COLUMN.into(), majors),
            Column::new(SUBCATEGORY_COLUMN.into(), minors),
            Column::new("201901".into(), rows.iter().map(|r| r.3).collect::<Vec<u64>>()),
            Column::new("201902".into(), rows.iter().map(|r| r.4).collect::<Vec<u64>>()),
        ])
        .unwrap()
    }

    #[test]
    fn header_aliases_resolve_to_canonical_columns() {
        assert_eq!(
            IdentifierColumn::from_header("MajorText"),
            Some(IdentifierColumn::MajorCrimeCategory)
        );
        assert_eq!(
            IdentifierColumn::from_header(" MinorText "),
            Some(IdentifierColumn::CrimeSubcategory)
        );
        assert_eq!(
            IdentifierColumn::from_header("BoroughName"),
            Some(IdentifierColumn::BoroughName)
        );
        assert_eq!(IdentifierColumn::from_header("201904"), None);
    }

    #[test]
    fn canonical_names_display() {
        let names: Vec<String> = IdentifierColumn::all()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            names,
            ["BoroughName", "MajorCrimeCategory", "CrimeSubcategory"]
        );
        let columns: Vec<&str> = IdentifierColumn::all()
            .iter()
            .map(|c| c.column_name())
            .collect();
        assert_eq!(columns, names);
    }

    #[test]
    fn wide_table_merges_duplicate_tuples_in_place() {
        let table = WideCrimeTable::new(
            wide_frame(&[
                ("Camden", "Burglary", "Domestic", 1, 2),
                ("Hackney", "Theft", "Other", 5, 5),
                ("Camden", "Burglary", "Domestic", 3, 4),
            ]),
            vec!["201901".to_string(), "201902".to_string()],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            string_values(table.frame(), BOROUGH_COLUMN).unwrap(),
            ["Camden", "Hackney"]
        );
        assert_eq!(count_values(table.frame(), "201901").unwrap(), [4, 5]);
        assert_eq!(count_values(table.frame(), "201902").unwrap(), [6, 5]);
    }

    #[test]
    fn wide_table_rejects_unknown_month_column() {
        let result = WideCrimeTable::new(
            wide_frame(&[("Camden", "Burglary", "Domestic", 1, 2)]),
            vec!["201912".to_string()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn records_round_trip_through_the_frame() {
        let records = vec![
            record("Westminster", "Theft", "201901", 3),
            record("Camden", "Burglary", "201902", 0),
        ];
        let table = CrimeTable::from_records(&records).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records().unwrap(), records);
    }

    #[test]
    fn borough_names_keep_first_appearance_order() {
        let table = CrimeTable::from_records(&[
            record("Westminster", "Theft", "201901", 1),
            record("Camden", "Theft", "201901", 1),
            record("Westminster", "Theft", "201902", 1),
        ])
        .unwrap();
        assert_eq!(table.borough_names().unwrap(), ["Westminster", "Camden"]);
        assert_eq!(table.for_borough("Westminster").unwrap().len(), 2);
        assert!(table.for_borough("Hackney").unwrap().is_empty());
    }

    #[test]
    fn major_categories_span_every_borough() {
        let table = CrimeTable::from_records(&[
            record("Camden", "Burglary", "201901", 1),
            record("Hackney", "Robbery", "201901", 1),
            record("Camden", "Burglary", "201902", 1),
        ])
        .unwrap();
        assert_eq!(table.major_categories().unwrap(), ["Burglary", "Robbery"]);
        assert_eq!(table.for_major_category("Robbery").unwrap().len(), 1);
    }

    #[test]
    fn empty_table_has_typed_columns() {
        let table = CrimeTable::from_records(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.borough_names().unwrap().is_empty());
        assert_eq!(table.frame().width(), 5);
    }
}
