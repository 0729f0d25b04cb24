use crate::error::DashError;
use serde::{Deserialize, Serialize};

/// One typed value of a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Interpret a raw field from a delimited file.
    ///
    /// Empty fields and the usual NA spellings become `Missing`; anything that
    /// parses as a float becomes `Number`; the rest stays `Text`.
    pub fn parse(raw: &str) -> Cell {
        let s = raw.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
            return Cell::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whole-number view of the cell, used for year and month columns.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Cell::Number(v) if v.fract() == 0.0 => Some(*v as i32),
            Cell::Text(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }

    /// Label view of the cell: text as-is, numbers printed without a trailing `.0`.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) if v.fract() == 0.0 => Some(format!("{}", *v as i64)),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Missing => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map(Cell::Number).unwrap_or(Cell::Missing)
    }
}

/// An immutable, named, ordered table of typed rows.
///
/// Rows are stored positionally; column names resolve to indices once and
/// transforms then read cells by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, checking that every row has one cell per column.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, DashError> {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(DashError::schema(
                &name,
                format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    columns.len()
                ),
            ));
        }
        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Position of a required column; absence is a schema error.
    pub fn column_index(&self, column: &str) -> Result<usize, DashError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DashError::schema(&self.name, format!("missing column `{column}`")))
    }

    /// All cells of one column, in row order.
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &Cell>, DashError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |r| &r[idx]))
    }
}
