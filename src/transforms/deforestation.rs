use super::regions_for_year;
use crate::charts::Figure;
use crate::error::DashError;
use crate::models::Table;
use crate::schema::DEFORESTATION;

/// Deforestation per region for the selected year.
pub fn deforestation_map(table: &Table, year: i32) -> Result<Figure, DashError> {
    regions_for_year(table, DEFORESTATION, year).map(Figure::Choropleth)
}
