//! Wide-to-long reshaping of the crime table.

use polars::prelude::*;
use safecity_crime_models::{
    COUNT_COLUMN, CrimeTable, IdentifierColumn, MONTH_COLUMN, WideCrimeTable,
};

use crate::DataError;

/// Melts the wide table into one row per identifier tuple and month.
///
/// Month columns are stacked in column order, each holding the wide rows in
/// their original order. A missing table stays missing, and so does one that
/// fails to reshape; the failure is logged.
#[must_use]
pub fn melt(table: Option<WideCrimeTable>) -> Option<CrimeTable> {
    let table = table?;

    match unpivot(&table) {
        Ok(long) => {
            log::debug!(
                "Reshaped {} wide rows x {} months into {} records",
                table.len(),
                table.months().len(),
                long.len()
            );
            Some(long)
        }
        Err(e) => {
            log::error!("Failed to reshape crime table: {e}");
            None
        }
    }
}

fn unpivot(table: &WideCrimeTable) -> Result<CrimeTable, DataError> {
    if table.months().is_empty() {
        return Ok(CrimeTable::from_records(&[])?);
    }

    let index: Vec<&str> = IdentifierColumn::all()
        .iter()
        .map(|c| c.column_name())
        .collect();

    let mut long = table.frame().unpivot(table.months().to_vec(), index)?;
    long.rename("variable", MONTH_COLUMN.into())?;
    long.rename("value", COUNT_COLUMN.into())?;

    Ok(CrimeTable::new(long)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_crime_csv;
    use safecity_crime_models::count_values;

    const SAMPLE: &str = "\
BoroughName,MajorText,MinorText,201901,201902,201903
Camden,Burglary,Burglary - Residential,10,12,9
Camden,Theft,Other Theft,30,25,28
Hackney,Burglary,Burglary - Residential,7,8,6
";

    #[test]
    fn none_propagates() {
        assert!(melt(None).is_none());
    }

    #[test]
    fn record_count_is_rows_times_months() {
        let wide = parse_crime_csv(SAMPLE.as_bytes()).unwrap();
        let expected = wide.len() * wide.months().len();
        let long = melt(Some(wide)).unwrap();
        assert_eq!(long.len(), expected);
    }

    #[test]
    fn per_tuple_sums_match_wide_row_totals() {
        let wide = parse_crime_csv(SAMPLE.as_bytes()).unwrap();
        let mut wide_totals = vec![0_u64; wide.len()];
        for month in wide.months() {
            for (total, count) in wide_totals
                .iter_mut()
                .zip(count_values(wide.frame(), month).unwrap())
            {
                *total += count;
            }
        }
        assert_eq!(wide_totals, [31, 83, 21]);

        let records = melt(Some(wide)).unwrap().records().unwrap();
        let melted = |borough: &str, major: &str| -> u64 {
            records
                .iter()
                .filter(|r| r.borough_name == borough && r.major_crime_category == major)
                .map(|r| r.crime_count)
                .sum()
        };
        assert_eq!(melted("Camden", "Burglary"), 31);
        assert_eq!(melted("Camden", "Theft"), 83);
        assert_eq!(melted("Hackney", "Burglary"), 21);
    }

    #[test]
    fn each_record_carries_its_month_label() {
        let wide = parse_crime_csv(SAMPLE.as_bytes()).unwrap();
        let records = melt(Some(wide)).unwrap().records().unwrap();

        let camden_theft: Vec<(&str, u64)> = records
            .iter()
            .filter(|r| r.borough_name == "Camden" && r.major_crime_category == "Theft")
            .map(|r| (r.month.as_str(), r.crime_count))
            .collect();
        assert_eq!(
            camden_theft,
            [("201901", 30), ("201902", 25), ("201903", 28)]
        );
    }

    #[test]
    fn header_only_table_melts_to_empty() {
        let wide = parse_crime_csv("BoroughName,MajorText,MinorText,201901\n".as_bytes()).unwrap();
        assert!(melt(Some(wide)).unwrap().is_empty());
    }

    #[test]
    fn table_without_month_columns_melts_to_empty() {
        let wide =
            parse_crime_csv("BoroughName,MajorText,MinorText\nCamden,Theft,Other\n".as_bytes())
                .unwrap();
        assert_eq!(wide.len(), 1);
        assert!(melt(Some(wide)).unwrap().is_empty());
    }
}
