use super::regions_for_year;
use crate::charts::Figure;
use crate::error::DashError;
use crate::models::Table;
use crate::schema::EMISSIONS;

/// The two years compared side by side on the emissions maps.
pub const EMISSIONS_YEARS: [i32; 2] = [1956, 2021];

/// CO2 emissions per capita for one of the fixed comparison years.
pub fn emissions_map(table: &Table, year: i32) -> Result<Figure, DashError> {
    regions_for_year(table, EMISSIONS, year).map(Figure::Choropleth)
}
