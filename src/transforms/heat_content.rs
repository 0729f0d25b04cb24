use crate::charts::{Bar, Figure, Tone};
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{ANOMALY_MONTH, ANOMALY_VALUE, ANOMALY_YEAR};
use std::collections::HashMap;

/// Months sampled from each year: the end of every quarter.
pub const QUARTER_MONTHS: [u32; 4] = [3, 6, 9, 12];

/// Quarterly ocean heat-content anomaly bars.
///
/// Years appear in first-seen order, months in `QUARTER_MONTHS` order. A
/// `(year, month)` pair with no row, or with no value, is skipped.
pub fn heat_content_bars(table: &Table) -> Result<Figure, DashError> {
    let year_idx = table.column_index(ANOMALY_YEAR)?;
    let month_idx = table.column_index(ANOMALY_MONTH)?;
    let value_idx = table.column_index(ANOMALY_VALUE)?;

    let mut years: Vec<i32> = Vec::new();
    let mut first_value: HashMap<(i32, u32), Option<f64>> = HashMap::new();
    for r in table.rows() {
        let Some(year) = r[year_idx].as_i32() else {
            continue;
        };
        if !years.contains(&year) {
            years.push(year);
        }
        if let Some(month) = r[month_idx].as_i32().and_then(|m| u32::try_from(m).ok()) {
            first_value
                .entry((year, month))
                .or_insert_with(|| r[value_idx].as_f64());
        }
    }

    let mut bars = Vec::new();
    for year in years {
        for month in QUARTER_MONTHS {
            if let Some(Some(value)) = first_value.get(&(year, month)) {
                bars.push(Bar {
                    label: format!("{month}/{year}"),
                    year,
                    month,
                    value: *value,
                    tone: Tone::of(*value),
                });
            }
        }
    }
    Ok(Figure::Bars { bars })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    #[test]
    fn only_quarter_months_are_kept() {
        let rows = (1..=12)
            .map(|m| vec![Cell::from(1999), Cell::from(m), Cell::from(m as f64 - 6.5)])
            .collect();
        let t = Table::new("h", [ANOMALY_YEAR, ANOMALY_MONTH, ANOMALY_VALUE], rows).unwrap();
        let Figure::Bars { bars } = heat_content_bars(&t).unwrap() else {
            panic!("expected bars");
        };
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["3/1999", "6/1999", "9/1999", "12/1999"]);
        assert_eq!(bars[1].tone, Tone::BelowBaseline);
        assert_eq!(bars[2].tone, Tone::AtOrAboveBaseline);
    }
}
