use crate::error::DashError;
use crate::models::Table;
use crate::schema::{self, DatasetKind};

/// The eight datasets, loaded once and shared read-only by every session.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStore {
    pub temperature: Table,
    pub deforestation: Table,
    pub seasons: Table,
    pub emissions: Table,
    pub greenhouse: Table,
    pub threats: Table,
    pub heat_content: Table,
    pub solutions: Table,
}

impl DatasetStore {
    /// Assemble a store from tables keyed by kind, validating each one.
    ///
    /// A missing dataset or column is fatal here rather than on first access.
    pub fn from_tables(
        mut tables: impl FnMut(DatasetKind) -> Option<Table>,
    ) -> Result<Self, DashError> {
        let mut take = |kind: DatasetKind| {
            let table = tables(kind)
                .ok_or_else(|| DashError::schema(kind.name(), "dataset not supplied"))?;
            schema::validate(kind, &table)?;
            Ok::<Table, DashError>(table)
        };
        Ok(Self {
            temperature: take(DatasetKind::Temperature)?,
            deforestation: take(DatasetKind::Deforestation)?,
            seasons: take(DatasetKind::Seasons)?,
            emissions: take(DatasetKind::Emissions)?,
            greenhouse: take(DatasetKind::Greenhouse)?,
            threats: take(DatasetKind::Threats)?,
            heat_content: take(DatasetKind::HeatContent)?,
            solutions: take(DatasetKind::Solutions)?,
        })
    }

    pub fn table(&self, kind: DatasetKind) -> &Table {
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
