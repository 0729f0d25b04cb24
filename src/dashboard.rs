//! One dashboard session: control state, visualization slots, and the
//! scheduler that keeps them consistent.
//!
//! # Update cycle
//!
//! 1. A `ControlChange` replaces one control value.
//! 2. `graph::dependents_of` lists the visualizations wired to that control.
//! 3. Each one is refreshed in table order: `Recompute` lanes run their
//!    transform against the current controls, `Memoized` lanes keep their
//!    first good result.
//! 4. The ids of the refreshed lanes are returned so a renderer can redraw
//!    exactly those.
//!
//! Lanes are isolated: a transform error lands in its own slot only.

use crate::charts::Figure;
use crate::controls::{ControlChange, ControlName, ControlState, OptionIndex};
use crate::error::DashError;
use crate::graph::{self, Refresh, VIZ_GRAPH, ViewSignal, VizId, VizNode};
use crate::store::DatasetStore;
use crate::transforms;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result held by one visualization slot.
pub type LaneResult = Result<Arc<Figure>, DashError>;

pub struct Dashboard {
    store: Arc<DatasetStore>,
    options: Arc<OptionIndex>,
    controls: ControlState,
    slots: BTreeMap<VizId, LaneResult>,
    computes: BTreeMap<VizId, u64>,
}

impl Dashboard {
    /// Start a session with default controls; every lane is computed once.
    ///
    /// Builds the option index for `store`. Further sessions over the same
    /// store should come from [`Dashboard::new_session`] so the index is
    /// built only once.
    pub fn new(store: Arc<DatasetStore>) -> Self {
        let options = Arc::new(OptionIndex::build(&store));
        Self::with_options(store, options)
    }

    /// Start a session reusing an option index already built for `store`.
    pub fn with_options(store: Arc<DatasetStore>, options: Arc<OptionIndex>) -> Self {
        let mut dash = Self {
            store,
            options,
            controls: ControlState::default(),
            slots: BTreeMap::new(),
            computes: BTreeMap::new(),
        };
        for node in VIZ_GRAPH.iter() {
            dash.refresh(node);
        }
        dash
    }

    /// A fresh session with default controls over the same store and index.
    pub fn new_session(&self) -> Self {
        Self::with_options(Arc::clone(&self.store), Arc::clone(&self.options))
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn options(&self) -> &OptionIndex {
        &self.options
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Current result of one visualization.
    pub fn lane(&self, id: VizId) -> &LaneResult {
        self.slots
            .get(&id)
            .unwrap_or_else(|| unreachable!("slot {id} is filled at construction"))
    }

    /// Every visualization with its current result, in graph order.
    pub fn lanes(&self) -> impl Iterator<Item = (VizId, &LaneResult)> {
        VIZ_GRAPH.iter().map(|n| (n.id, self.lane(n.id)))
    }

    /// How many times the transform behind `id` has actually run.
    pub fn compute_count(&self, id: VizId) -> u64 {
        self.computes.get(&id).copied().unwrap_or(0)
    }

    /// Process one control change and refresh its dependents.
    ///
    /// An invalid change (e.g. a click count that does not advance) is
    /// returned as an error and leaves every control and slot untouched.
    pub fn apply(&mut self, change: ControlChange) -> Result<Vec<VizId>, DashError> {
        let control = change.control();
        debug!("control change {control}: {change:?}");
        self.controls.apply(change)?;
        Ok(graph::dependents_of(control)
            .map(|node| {
                self.refresh(node);
                node.id
            })
            .collect())
    }

    /// Press the update button.
    pub fn press_update(&mut self) -> Result<Vec<VizId>, DashError> {
        let change = self.controls.next_click();
        self.apply(change)
    }

    /// Deliver a view-state signal; carries no data.
    pub fn signal(&mut self, signal: ViewSignal) -> Vec<VizId> {
        debug!("view signal {signal:?}");
        graph::signal_targets(signal)
            .map(|node| {
                self.refresh(node);
                node.id
            })
            .collect()
    }

    fn refresh(&mut self, node: &VizNode) {
        if node.refresh == Refresh::Memoized && matches!(self.slots.get(&node.id), Some(Ok(_))) {
            debug!("{}: memoized", node.id);
            return;
        }
        let result = self.compute(node.id).map(Arc::new);
        *self.computes.entry(node.id).or_default() += 1;
        match &result {
            Ok(fig) => debug!("{}: recomputed {}", node.id, fig.kind_name()),
            Err(e) => warn!("{}: {e}", node.id),
        }
        self.slots.insert(node.id, result);
    }

    fn compute(&self, id: VizId) -> Result<Figure, DashError> {
        let store = &self.store;
        let controls = &self.controls;
        match id {
            VizId::Temperature => {
                self.options
                    .check(ControlName::SelectedCountry, controls.country())?;
                transforms::temperature_series(&store.temperature, controls.country())
            }
            VizId::Deforestation => {
                transforms::deforestation_map(&store.deforestation, controls.year())
            }
            VizId::Seasons => {
                self.options
                    .check(ControlName::SelectedSeason, controls.season())?;
                transforms::season_series(&store.seasons, controls.season())
            }
            VizId::Emissions1956 => {
                transforms::emissions_map(&store.emissions, transforms::EMISSIONS_YEARS[0])
            }
            VizId::Emissions2021 => {
                transforms::emissions_map(&store.emissions, transforms::EMISSIONS_YEARS[1])
            }
            VizId::Threats => transforms::threat_shares(&store.threats),
            VizId::HeatContent => transforms::heat_content_bars(&store.heat_content),
            VizId::GreenhouseLines => {
                self.options
                    .check(ControlName::SelectedGas, controls.gas())?;
                transforms::greenhouse_lines(&store.greenhouse, controls.gas())
            }
            VizId::GreenhouseArea => transforms::greenhouse_total(&store.greenhouse),
            VizId::Solutions => transforms::solution_outline(&store.solutions),
        }
    }
}
