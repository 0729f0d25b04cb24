//! climate_trends
//!
//! Turns climate datasets into chart-ready figures for an interactive
//! dashboard. Pairs with the `climate-trends` CLI and the
//! `climate-trends-gui` desktop dashboard.
//!
//! ### Features
//! - Load the eight dashboard datasets from CSV, validating columns up front
//! - One pure transform per visualization (series, maps, bars, pie, outline)
//! - A session scheduler that recomputes only the visualizations wired to the
//!   control that changed, with per-visualization error isolation
//! - Export figures as CSV or JSON, or draw line/area/bar figures to SVG/PNG
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use climate_trends::{ControlChange, Dashboard, VizId, storage};
//!
//! let store = storage::load_store("dataset", &storage::DatasetFiles::default())?;
//! let mut dash = Dashboard::new(Arc::new(store));
//! let changed = dash.apply(ControlChange::SelectedCountry("Chad".into()))?;
//! assert_eq!(changed, vec![VizId::Temperature]);
//! if let Ok(fig) = dash.lane(VizId::Temperature) {
//!     storage::save_figure_json(fig, "temperature.json")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charts;
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod graph;
pub mod models;
pub mod schema;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transforms;
pub mod viz;

pub use charts::Figure;
pub use controls::{ControlChange, ControlName, ControlState, OptionIndex};
pub use dashboard::{Dashboard, LaneResult};
pub use error::DashError;
pub use graph::{ViewSignal, VizId};
pub use store::DatasetStore;
