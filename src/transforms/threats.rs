use crate::charts::{Figure, Slice};
use crate::error::DashError;
use crate::models::Table;
use crate::schema::{PERCENTAGE, THREAT};

/// Share of each threat category, in dataset order.
pub fn threat_shares(table: &Table) -> Result<Figure, DashError> {
    let threat_idx = table.column_index(THREAT)?;
    let pct_idx = table.column_index(PERCENTAGE)?;
    let slices = table
        .rows()
        .filter_map(|r| {
            let category = r[threat_idx].label()?;
            let percentage = r[pct_idx].as_f64()?;
            Some(Slice {
                category,
                percentage,
            })
        })
        .collect();
    Ok(Figure::Pie { slices })
}
