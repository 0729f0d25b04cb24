use crate::charts::{Emphasis, Figure, Series, XyPoint};
use crate::controls::ControlName;
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{GASES, YEAR};

/// One line per gas; the selected gas is emphasized, the others muted.
pub fn greenhouse_lines(table: &Table, selected_gas: &str) -> Result<Figure, DashError> {
    if !GASES.contains(&selected_gas) {
        return Err(DashError::lookup(
            ControlName::SelectedGas.as_str(),
            selected_gas,
        ));
    }
    let year_idx = table.column_index(YEAR)?;
    let mut series = Vec::with_capacity(GASES.len());
    for gas in GASES {
        let idx = table.column_index(gas)?;
        let points = table
            .rows()
            .filter_map(|r| {
                r[year_idx].as_i32().map(|x| XyPoint {
                    x,
                    y: r[idx].as_f64(),
                })
            })
            .collect();
        let emphasis = if gas == selected_gas {
            Emphasis::Emphasized
        } else {
            Emphasis::Muted
        };
        series.push(Series::new(gas, points).with_emphasis(emphasis));
    }
    Ok(Figure::Lines { series })
}

/// Row-wise total of the six gases. Missing cells count as zero.
///
/// Does not depend on the selected gas.
pub fn greenhouse_total(table: &Table) -> Result<Figure, DashError> {
    let year_idx = table.column_index(YEAR)?;
    let gas_idx = GASES
        .iter()
        .map(|g| table.column_index(g))
        .collect::<Result<Vec<_>, _>>()?;
    let points = table
        .rows()
        .filter_map(|r| {
            let x = r[year_idx].as_i32()?;
            let total = gas_idx.iter().filter_map(|&i| r[i].as_f64()).sum::<f64>();
            Some(XyPoint { x, y: Some(total) })
        })
        .collect();
    Ok(Figure::Area {
        series: Series::new("Total Concentration", points),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    fn table() -> Table {
        let mut cols = vec![YEAR];
        cols.extend(GASES);
        cols.push("Total");
        Table::new(
            "greenhouse",
            cols,
            vec![
                vec![
                    Cell::from(1979),
                    Cell::from(1.0),
                    Cell::from(0.5),
                    Cell::from(0.1),
                    Cell::from(0.2),
                    Cell::from(0.1),
                    Cell::Missing,
                    Cell::from(100.0),
                ],
                vec![
                    Cell::from(1980),
                    Cell::from(1.1),
                    Cell::from(0.5),
                    Cell::from(0.1),
                    Cell::from(0.2),
                    Cell::from(0.1),
                    Cell::from(0.1),
                    Cell::from(100.0),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn total_ignores_the_total_column_and_treats_missing_as_zero() {
        let fig = greenhouse_total(&table()).unwrap();
        let totals: Vec<f64> = fig.series()[0]
            .points
            .iter()
            .map(|p| p.y.unwrap())
            .collect();
        assert!((totals[0] - 1.9).abs() < 1e-9);
        assert!((totals[1] - 2.1).abs() < 1e-9);
    }

    #[test]
    fn unknown_gas_is_a_lookup_error() {
        assert!(greenhouse_lines(&table(), "Total").unwrap_err().is_lookup());
    }
}
