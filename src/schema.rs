//! Column layout of every dataset the dashboard reads, checked once at load.

use crate::error::DashError;
use crate::models::Table;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The eight datasets of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Temperature,
    Deforestation,
    Seasons,
    Emissions,
    Greenhouse,
    Threats,
    HeatContent,
    Solutions,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::Temperature,
        DatasetKind::Deforestation,
        DatasetKind::Seasons,
        DatasetKind::Emissions,
        DatasetKind::Greenhouse,
        DatasetKind::Threats,
        DatasetKind::HeatContent,
        DatasetKind::Solutions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Temperature => "surface-temperature",
            DatasetKind::Deforestation => "deforestation",
            DatasetKind::Seasons => "seasonal-temperature",
            DatasetKind::Emissions => "co2-emissions",
            DatasetKind::Greenhouse => "greenhouse-gas",
            DatasetKind::Threats => "biodiversity-threats",
            DatasetKind::HeatContent => "heat-content-anomaly",
            DatasetKind::Solutions => "solution-hierarchy",
        }
    }

    /// Columns that must be present by name.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Temperature => &[COUNTRY],
            DatasetKind::Deforestation => &[ENTITY, CODE, YEAR, DEFORESTATION],
            DatasetKind::Seasons => &[YEAR],
            DatasetKind::Emissions => &[ENTITY, CODE, YEAR, EMISSIONS],
            DatasetKind::Greenhouse => &[
                YEAR,
                GASES[0],
                GASES[1],
                GASES[2],
                GASES[3],
                GASES[4],
                GASES[5],
            ],
            DatasetKind::Threats => &[THREAT, PERCENTAGE],
            DatasetKind::HeatContent => &[ANOMALY_YEAR, ANOMALY_MONTH, ANOMALY_VALUE],
            DatasetKind::Solutions => &[LEVEL, CATEGORY, SUBCATEGORY],
        }
    }
}

pub const COUNTRY: &str = "Country";
pub const ENTITY: &str = "Entity";
pub const CODE: &str = "Code";
pub const YEAR: &str = "Year";
pub const DEFORESTATION: &str = "Deforestation";
pub const EMISSIONS: &str = "emissions";
pub const THREAT: &str = "threats";
pub const PERCENTAGE: &str = "percentage";
pub const ANOMALY_YEAR: &str = "year";
pub const ANOMALY_MONTH: &str = "month";
pub const ANOMALY_VALUE: &str = "anamoly";
pub const LEVEL: &str = "Level";
pub const CATEGORY: &str = "Category";
pub const SUBCATEGORY: &str = "Subcategory";

/// The six gas columns of the greenhouse dataset, in display order.
pub const GASES: [&str; 6] = ["CO2", "CH4", "N2O", "CFC12", "CFC11", "15-minor"];

/// First year-labeled column of the temperature dataset.
pub const TEMPERATURE_FIRST_YEAR_COLUMN: usize = 10;
/// Trailing temperature columns that are not part of the year range.
pub const TEMPERATURE_TRAILING_COLUMNS: usize = 1;

/// Sentinel meaning "absent at this row" in the hierarchy dataset.
pub const SENTINEL: &str = "-";

static YEAR_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9](\d{1,4})$").expect("static regex"));

/// Year of a label such as `F1961`; the single leading character is dropped.
pub fn year_of_label(label: &str) -> Option<i32> {
    YEAR_LABEL
        .captures(label.trim())
        .and_then(|c| c[1].parse::<i32>().ok())
}

/// Positions and years of the temperature dataset's year columns.
pub fn temperature_year_columns(table: &Table) -> Result<Vec<(usize, i32)>, DashError> {
    let cols = table.columns();
    let end = cols.len().saturating_sub(TEMPERATURE_TRAILING_COLUMNS);
    if end <= TEMPERATURE_FIRST_YEAR_COLUMN {
        return Err(DashError::schema(
            table.name(),
            format!(
                "expected year columns from index {TEMPERATURE_FIRST_YEAR_COLUMN}, found {} columns",
                cols.len()
            ),
        ));
    }
    let mut out = Vec::with_capacity(end - TEMPERATURE_FIRST_YEAR_COLUMN);
    for (idx, label) in cols
        .iter()
        .enumerate()
        .take(end)
        .skip(TEMPERATURE_FIRST_YEAR_COLUMN)
    {
        let year = year_of_label(label).ok_or_else(|| {
            DashError::schema(table.name(), format!("column `{label}` is not a year label"))
        })?;
        if let Some(&(_, prev)) = out.last()
            && year <= prev
        {
            return Err(DashError::schema(
                table.name(),
                format!("year column `{label}` is out of order"),
            ));
        }
        out.push((idx, year));
    }
    Ok(out)
}

/// Check a loaded table against the layout its transforms need.
pub fn validate(kind: DatasetKind, table: &Table) -> Result<(), DashError> {
    for column in kind.required_columns() {
        table.column_index(column)?;
    }
    match kind {
        DatasetKind::Temperature => {
            temperature_year_columns(table)?;
        }
        DatasetKind::Seasons => {
            if table.columns().len() < 2 {
                return Err(DashError::schema(table.name(), "no season columns"));
            }
        }
        DatasetKind::Solutions => {
            for (i, level) in table.column(LEVEL)?.enumerate() {
                match level.as_i32() {
                    Some(l) if l >= 1 => {}
                    _ => {
                        return Err(DashError::schema(
                            table.name(),
                            format!("row {}: `{LEVEL}` must be a positive integer", i + 1),
                        ));
                    }
                }
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    #[test]
    fn year_labels_drop_one_leading_character() {
        assert_eq!(year_of_label("F1961"), Some(1961));
        assert_eq!(year_of_label("Y2021"), Some(2021));
        assert_eq!(year_of_label("1961"), None);
        assert_eq!(year_of_label("Unit"), None);
    }

    #[test]
    fn solutions_reject_zero_level() {
        let t = Table::new(
            "s",
            [LEVEL, CATEGORY, SUBCATEGORY],
            vec![vec![Cell::from(0), Cell::from("A"), Cell::from("-")]],
        )
        .unwrap();
        assert!(validate(DatasetKind::Solutions, &t).is_err());
    }

    #[test]
    fn greenhouse_requires_every_gas() {
        let t = Table::new("g", [YEAR, "CO2", "CH4"], vec![]).unwrap();
        let err = validate(DatasetKind::Greenhouse, &t).unwrap_err();
        assert_eq!(
            err,
            DashError::schema("g", "missing column `N2O`")
        );
    }
}
