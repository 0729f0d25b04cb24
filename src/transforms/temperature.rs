use crate::charts::{Figure, Series, XyPoint};
use crate::controls::ControlName;
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{COUNTRY, temperature_year_columns};

/// Surface temperature change of one country, one point per year column.
///
/// Duplicate country rows are not merged: the first match wins.
pub fn temperature_series(table: &Table, country: &str) -> Result<Figure, DashError> {
    let country_idx = table.column_index(COUNTRY)?;
    let years = temperature_year_columns(table)?;

    let row = table
        .rows()
        .find(|r| r[country_idx].label().as_deref() == Some(country))
        .ok_or_else(|| DashError::lookup(ControlName::SelectedCountry.as_str(), country))?;

    let points = years
        .iter()
        .map(|&(idx, year)| XyPoint {
            x: year,
            y: row[idx].as_f64(),
        })
        .collect();
    Ok(Figure::Lines {
        series: vec![Series::new(country, points)],
    })
}
