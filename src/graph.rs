//! Static wiring between controls and visualizations.
//!
//! The graph is bipartite and flat: controls on one side, visualizations on
//! the other, no visualization feeding another. Table order is the order in
//! which dependents are recomputed and delivered.

use crate::controls::ControlName;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizId {
    Temperature,
    Deforestation,
    Seasons,
    Emissions1956,
    Emissions2021,
    Threats,
    HeatContent,
    GreenhouseLines,
    GreenhouseArea,
    Solutions,
}

impl VizId {
    pub fn as_str(self) -> &'static str {
        match self {
            VizId::Temperature => "temperature",
            VizId::Deforestation => "deforestation",
            VizId::Seasons => "seasons",
            VizId::Emissions1956 => "emissions_1956",
            VizId::Emissions2021 => "emissions_2021",
            VizId::Threats => "threats",
            VizId::HeatContent => "heat_content",
            VizId::GreenhouseLines => "greenhouse_lines",
            VizId::GreenhouseArea => "greenhouse_area",
            VizId::Solutions => "solutions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            VizId::Temperature => "Annual Surface Temperature Change",
            VizId::Deforestation => "Annual Deforestation",
            VizId::Seasons => "Seasonal Temperature Change",
            VizId::Emissions1956 => "CO2 Emissions per Capita (1956)",
            VizId::Emissions2021 => "CO2 Emissions per Capita (2021)",
            VizId::Threats => "Distribution of Threats to Biodiversity",
            VizId::HeatContent => "Heat Content Anomaly",
            VizId::GreenhouseLines => "Greenhouse Gas Concentration",
            VizId::GreenhouseArea => "Total Concentration of Greenhouse Gases",
            VizId::Solutions => "Solution",
        }
    }

    pub fn node(self) -> &'static VizNode {
        VIZ_GRAPH
            .iter()
            .find(|n| n.id == self)
            .unwrap_or_else(|| unreachable!("every VizId has a graph entry"))
    }
}

impl fmt::Display for VizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a visualization reacts when one of its triggers fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Run the transform again with the current control values.
    Recompute,
    /// Output never depends on the trigger's value: keep the first good result
    /// and deliver it again.
    Memoized,
}

/// Non-data view signals a visualization listens to (map pan/zoom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal {
    Relayout(VizId),
}

#[derive(Debug)]
pub struct VizNode {
    pub id: VizId,
    pub depends_on: &'static [ControlName],
    pub view_signals: bool,
    pub refresh: Refresh,
}

impl VizNode {
    pub fn depends_on(&self, control: ControlName) -> bool {
        self.depends_on.contains(&control)
    }
}

pub static VIZ_GRAPH: [VizNode; 10] = [
    VizNode {
        id: VizId::Temperature,
        depends_on: &[ControlName::SelectedCountry],
        view_signals: false,
        refresh: Refresh::Recompute,
    },
    VizNode {
        id: VizId::Deforestation,
        depends_on: &[ControlName::SelectedYear],
        view_signals: false,
        refresh: Refresh::Recompute,
    },
    VizNode {
        id: VizId::Seasons,
        depends_on: &[ControlName::SelectedSeason],
        view_signals: false,
        refresh: Refresh::Recompute,
    },
    VizNode {
        id: VizId::Emissions1956,
        depends_on: &[],
        view_signals: true,
        refresh: Refresh::Memoized,
    },
    VizNode {
        id: VizId::Emissions2021,
        depends_on: &[],
        view_signals: true,
        refresh: Refresh::Memoized,
    },
    VizNode {
        id: VizId::Threats,
        depends_on: &[],
        view_signals: false,
        refresh: Refresh::Memoized,
    },
    VizNode {
        id: VizId::HeatContent,
        depends_on: &[ControlName::UpdateTrigger],
        view_signals: false,
        refresh: Refresh::Recompute,
    },
    VizNode {
        id: VizId::GreenhouseLines,
        depends_on: &[ControlName::SelectedGas],
        view_signals: false,
        refresh: Refresh::Recompute,
    },
    VizNode {
        id: VizId::GreenhouseArea,
        depends_on: &[ControlName::SelectedGas],
        view_signals: false,
        refresh: Refresh::Memoized,
    },
    VizNode {
        id: VizId::Solutions,
        depends_on: &[],
        view_signals: false,
        refresh: Refresh::Memoized,
    },
];

/// Visualizations that declare `control` as a dependency, in table order.
pub fn dependents_of(control: ControlName) -> impl Iterator<Item = &'static VizNode> {
    VIZ_GRAPH.iter().filter(move |n| n.depends_on(control))
}

/// Visualizations that react to a view signal. Both emissions maps answer a
/// relayout of either one, as they are produced together; a relayout from a
/// visualization without view signals reaches nothing.
pub fn signal_targets(signal: ViewSignal) -> impl Iterator<Item = &'static VizNode> {
    let ViewSignal::Relayout(source) = signal;
    let listens = source.node().view_signals;
    VIZ_GRAPH.iter().filter(move |n| listens && n.view_signals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_has_exactly_one_node() {
        for node in VIZ_GRAPH.iter() {
            assert_eq!(VIZ_GRAPH.iter().filter(|n| n.id == node.id).count(), 1);
            assert_eq!(node.id.node().id, node.id);
        }
    }

    #[test]
    fn gas_drives_both_greenhouse_views() {
        let ids: Vec<VizId> = dependents_of(ControlName::SelectedGas).map(|n| n.id).collect();
        assert_eq!(ids, vec![VizId::GreenhouseLines, VizId::GreenhouseArea]);
    }

    #[test]
    fn relayout_reaches_maps_only_from_a_map() {
        let from_map: Vec<VizId> = signal_targets(ViewSignal::Relayout(VizId::Emissions2021))
            .map(|n| n.id)
            .collect();
        assert_eq!(from_map, vec![VizId::Emissions1956, VizId::Emissions2021]);
        assert_eq!(
            signal_targets(ViewSignal::Relayout(VizId::Temperature)).count(),
            0
        );
    }

    #[test]
    fn every_control_has_a_dependent() {
        for control in ControlName::ALL {
            assert!(dependents_of(control).next().is_some(), "{control}");
        }
    }
}
