//! Pure transforms from (dataset, control values) to chart-ready figures.
//!
//! Every function here only reads its table; none keeps state between calls.

pub mod deforestation;
pub mod emissions;
pub mod greenhouse;
pub mod heat_content;
pub mod hierarchy;
pub mod seasons;
pub mod temperature;
pub mod threats;

pub use deforestation::deforestation_map;
pub use emissions::{EMISSIONS_YEARS, emissions_map};
pub use greenhouse::{greenhouse_lines, greenhouse_total};
pub use heat_content::{QUARTER_MONTHS, heat_content_bars};
pub use hierarchy::solution_outline;
pub use seasons::season_series;
pub use temperature::temperature_series;
pub use threats::threat_shares;

use crate::charts::{Choropleth, RegionValue};
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{CODE, ENTITY, YEAR};

/// Rows of a country/year table for one year, as `(code, value, label)` regions.
///
/// Shared by the deforestation and emissions maps; an absent year gives an
/// empty map.
pub(crate) fn regions_for_year(
    table: &Table,
    value_column: &str,
    year: i32,
) -> Result<Choropleth, DashError> {
    let year_idx = table.column_index(YEAR)?;
    let code_idx = table.column_index(CODE)?;
    let entity_idx = table.column_index(ENTITY)?;
    let value_idx = table.column_index(value_column)?;

    let regions = table
        .rows()
        .filter(|r| r[year_idx].as_i32() == Some(year))
        .map(|r| RegionValue {
            code: r[code_idx].label(),
            value: r[value_idx].as_f64(),
            label: r[entity_idx].label().unwrap_or_default(),
        })
        .collect();
    Ok(Choropleth { year, regions })
}
