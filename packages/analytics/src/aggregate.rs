//! Grouping and summing over the long-form crime table.
//!
//! Every aggregate is a lazy polars `group_by` over the table's frame,
//! sorted by its keys; for `YYYYMM` month labels that is chronological.
//! Dropdown options keep first-appearance order.

use polars::prelude::*;
use safecity_analytics_models::DropdownOption;
use safecity_analytics_models::figure::NO_DATA_MESSAGE;
use safecity_crime_models::{
    BOROUGH_COLUMN, COUNT_COLUMN, CrimeTable, MAJOR_CATEGORY_COLUMN, MONTH_COLUMN,
    SUBCATEGORY_COLUMN, count_values, string_values,
};
use safecity_geography_models::{BoroughCount, CategoryCount, MonthCount, SubcategorySeries};

/// Sums [`COUNT_COLUMN`] per distinct combination of `keys`, sorted by them.
fn sum_by(table: &CrimeTable, keys: &[&str]) -> PolarsResult<DataFrame> {
    let keys: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();

    table
        .frame()
        .clone()
        .lazy()
        .group_by(keys.clone())
        .agg([col(COUNT_COLUMN).sum()])
        .sort_by_exprs(keys, SortMultipleOptions::default())
        .collect()
}

/// Total count per borough across every month and category.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the grouping fails.
pub fn borough_totals(table: &CrimeTable) -> PolarsResult<Vec<BoroughCount>> {
    let totals = sum_by(table, &[BOROUGH_COLUMN])?;

    Ok(string_values(&totals, BOROUGH_COLUMN)?
        .into_iter()
        .zip(count_values(&totals, COUNT_COLUMN)?)
        .map(|(borough, count)| BoroughCount { borough, count })
        .collect())
}

/// Total count per month across every category.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the grouping fails.
pub fn monthly_totals(table: &CrimeTable) -> PolarsResult<Vec<MonthCount>> {
    let totals = sum_by(table, &[MONTH_COLUMN])?;

    Ok(string_values(&totals, MONTH_COLUMN)?
        .into_iter()
        .zip(count_values(&totals, COUNT_COLUMN)?)
        .map(|(month, count)| MonthCount { month, count })
        .collect())
}

/// Total count per major category.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the grouping fails.
pub fn category_totals(table: &CrimeTable) -> PolarsResult<Vec<CategoryCount>> {
    let totals = sum_by(table, &[MAJOR_CATEGORY_COLUMN])?;

    Ok(string_values(&totals, MAJOR_CATEGORY_COLUMN)?
        .into_iter()
        .zip(count_values(&totals, COUNT_COLUMN)?)
        .map(|(category, count)| CategoryCount { category, count })
        .collect())
}

/// One monthly series per subcategory of `major_category`.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the filter or grouping fails.
pub fn subcategory_series(
    table: &CrimeTable,
    major_category: &str,
) -> PolarsResult<Vec<SubcategorySeries>> {
    let totals = sum_by(
        &table.for_major_category(major_category)?,
        &[SUBCATEGORY_COLUMN, MONTH_COLUMN],
    )?;

    let subcategories = string_values(&totals, SUBCATEGORY_COLUMN)?;
    let months = string_values(&totals, MONTH_COLUMN)?;
    let counts = count_values(&totals, COUNT_COLUMN)?;

    let mut series: Vec<SubcategorySeries> = Vec::new();
    for ((subcategory, month), count) in subcategories.into_iter().zip(months).zip(counts) {
        let point = MonthCount { month, count };
        match series.last_mut() {
            Some(last) if last.subcategory == subcategory => last.points.push(point),
            _ => series.push(SubcategorySeries {
                subcategory,
                points: vec![point],
            }),
        }
    }

    Ok(series)
}

/// Major categories present in `table`, as dropdown options.
///
/// # Errors
///
/// Returns a [`PolarsError`] if the column cannot be read.
pub fn major_category_options(table: &CrimeTable) -> PolarsResult<Vec<DropdownOption>> {
    Ok(table
        .major_categories()?
        .iter()
        .map(|c| DropdownOption::same(c))
        .collect())
}

/// Boroughs present in the table, as dropdown options.
///
/// Without data the dropdown gets a single disabled-looking entry so the
/// page still explains itself.
#[must_use]
pub fn borough_options(table: Option<&CrimeTable>) -> Vec<DropdownOption> {
    let names = table.map(CrimeTable::borough_names);

    match names {
        Some(Ok(names)) => names.iter().map(|n| DropdownOption::same(n)).collect(),
        Some(Err(e)) => {
            log::error!("Failed to list boroughs: {e}");
            no_data_option()
        }
        None => no_data_option(),
    }
}

fn no_data_option() -> Vec<DropdownOption> {
    vec![DropdownOption {
        label: NO_DATA_MESSAGE.to_string(),
        value: String::new(),
    }]
}
