use crate::charts::{Figure, Series, XyPoint};
use crate::controls::{COMBINED, ControlName};
use crate::error::DashError;
use crate::models::Table;
use crate::schema::YEAR;

/// Seasonal temperature change: every season for `"Combined"`, else one.
///
/// Points follow the dataset's row order; rows are assumed chronological.
pub fn season_series(table: &Table, season: &str) -> Result<Figure, DashError> {
    let year_idx = table.column_index(YEAR)?;
    let seasons: Vec<(usize, &str)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != year_idx)
        .map(|(idx, name)| (idx, name.as_str()))
        .collect();

    let selected: Vec<(usize, &str)> = if season == COMBINED {
        seasons
    } else {
        let found = seasons
            .into_iter()
            .find(|&(_, name)| name == season)
            .ok_or_else(|| DashError::lookup(ControlName::SelectedSeason.as_str(), season))?;
        vec![found]
    };

    let series = selected
        .into_iter()
        .map(|(idx, name)| {
            let points = table
                .rows()
                .filter_map(|r| {
                    r[year_idx].as_i32().map(|x| XyPoint {
                        x,
                        y: r[idx].as_f64(),
                    })
                })
                .collect();
            Series::new(name, points)
        })
        .collect();
    Ok(Figure::Lines { series })
}
