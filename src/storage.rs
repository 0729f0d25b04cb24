//! Dataset loading from delimited files and export of chart-ready figures.

use crate::charts::{Emphasis, Figure, Tone};
use crate::models::{Cell, Table};
use crate::schema::DatasetKind;
use crate::store::DatasetStore;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// File name of each dataset inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub temperature: String,
    pub deforestation: String,
    pub seasons: String,
    pub emissions: String,
    pub greenhouse: String,
    pub threats: String,
    pub heat_content: String,
    pub solutions: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            temperature: "Annual_Surface_Temperature_Change.csv".into(),
            deforestation: "annual-deforestation.csv".into(),
            seasons: "season-wise-change.csv".into(),
            emissions: "co-emissions-per-capita.csv".into(),
            greenhouse: "AGGI_Table.csv".into(),
            threats: "threats.csv".into(),
            heat_content: "anamoly.csv".into(),
            solutions: "treemap.csv".into(),
        }
    }
}

impl DatasetFiles {
    pub fn file_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Temperature => &self.temperature,
            DatasetKind::Deforestation => &self.deforestation,
            DatasetKind::Seasons => &self.seasons,
            DatasetKind::Emissions => &self.emissions,
            DatasetKind::Greenhouse => &self.greenhouse,
            DatasetKind::Threats => &self.threats,
            DatasetKind::HeatContent => &self.heat_content,
            DatasetKind::Solutions => &self.solutions,
        }
    }
}

/// Read a JSON manifest; fields left out keep their default file names.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<DatasetFiles> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open manifest {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parse manifest {}", path.display()))
}

/// Load one header-ful CSV file into a typed table.
pub fn load_table<P: AsRef<Path>>(path: P, name: &str) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let columns: Vec<String> = rdr
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("{}: record {}", path.display(), i + 1))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }
    Ok(Table::new(name, columns, rows)?)
}

/// Load and validate all eight datasets from `dir`.
///
/// Fails fast on the first missing file or missing column.
pub fn load_store<P: AsRef<Path>>(dir: P, files: &DatasetFiles) -> Result<DatasetStore> {
    let dir = dir.as_ref();
    let mut tables = HashMap::new();
    for kind in DatasetKind::ALL {
        let path = dir.join(files.file_name(kind));
        let table = load_table(&path, kind.name())?;
        info!("loaded {} ({} rows) from {}", kind.name(), table.len(), path.display());
        tables.insert(kind, table);
    }
    let store = DatasetStore::from_tables(|kind| tables.remove(&kind))?;
    Ok(store)
}

/// Save a figure as pretty JSON.
pub fn save_figure_json<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(figure)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a figure as CSV, one row per point, region, bar, slice or line.
pub fn save_figure_csv<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    match figure {
        Figure::Lines { .. } | Figure::Area { .. } => {
            wtr.serialize(("series", "emphasis", "year", "value"))?;
            for s in figure.series() {
                for p in &s.points {
                    wtr.serialize((safe(&s.name), emphasis_name(s.emphasis), p.x, p.y))?;
                }
            }
        }
        Figure::Choropleth(map) => {
            wtr.serialize(("year", "code", "label", "value"))?;
            for r in &map.regions {
                wtr.serialize((map.year, r.code.as_deref().map(safe), safe(&r.label), r.value))?;
            }
        }
        Figure::Bars { bars } => {
            wtr.serialize(("label", "year", "month", "value", "tone"))?;
            for b in bars {
                wtr.serialize((&b.label, b.year, b.month, b.value, tone_name(b.tone)))?;
            }
        }
        Figure::Pie { slices } => {
            wtr.serialize(("category", "percentage"))?;
            for s in slices {
                wtr.serialize((safe(&s.category), s.percentage))?;
            }
        }
        Figure::Outline { text } => {
            wtr.serialize(("line",))?;
            for line in text.lines() {
                wtr.serialize((safe(line),))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Prefix text that a spreadsheet would evaluate as a formula.
fn safe(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

fn emphasis_name(e: Emphasis) -> &'static str {
    match e {
        Emphasis::Normal => "normal",
        Emphasis::Emphasized => "emphasized",
        Emphasis::Muted => "muted",
    }
}

fn tone_name(t: Tone) -> &'static str {
    match t {
        Tone::BelowBaseline => "below_baseline",
        Tone::AtOrAboveBaseline => "at_or_above_baseline",
    }
}
