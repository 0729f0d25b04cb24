use climate_trends::models::{Cell, Table};
use climate_trends::storage::{self, DatasetFiles};
use climate_trends::{
    ControlChange, DashError, Dashboard, DatasetStore, Figure, ViewSignal, VizId, graph,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn store() -> Arc<DatasetStore> {
    Arc::new(storage::load_store(fixtures(), &DatasetFiles::default()).unwrap())
}

fn counts(dash: &Dashboard) -> Vec<(VizId, u64)> {
    graph::VIZ_GRAPH
        .iter()
        .map(|n| (n.id, dash.compute_count(n.id)))
        .collect()
}

/// Counts after a change: `bumped` lanes ran once more, every other lane is unchanged.
fn assert_only_bumped(before: &[(VizId, u64)], after: &[(VizId, u64)], bumped: &[VizId]) {
    for ((id, b), (_, a)) in before.iter().zip(after) {
        let expected = if bumped.contains(id) { b + 1 } else { *b };
        assert_eq!(*a, expected, "compute count of {id}");
    }
}

#[test]
fn session_starts_with_every_lane_computed_once() {
    let dash = Dashboard::new(store());
    for (id, lane) in dash.lanes() {
        assert!(lane.is_ok(), "{id}: {lane:?}");
        assert_eq!(dash.compute_count(id), 1);
    }
    assert_eq!(dash.controls().country(), "India");
    assert_eq!(dash.controls().year(), 1990);
}

#[test]
fn each_control_recomputes_exactly_its_dependents() {
    let mut dash = Dashboard::new(store());

    let cases = [
        (
            ControlChange::SelectedCountry("Chad".into()),
            vec![VizId::Temperature],
            vec![VizId::Temperature],
        ),
        (
            ControlChange::SelectedYear(2000),
            vec![VizId::Deforestation],
            vec![VizId::Deforestation],
        ),
        (
            ControlChange::SelectedSeason("Summer".into()),
            vec![VizId::Seasons],
            vec![VizId::Seasons],
        ),
        // the area lane is delivered again but not recomputed
        (
            ControlChange::SelectedGas("CH4".into()),
            vec![VizId::GreenhouseLines, VizId::GreenhouseArea],
            vec![VizId::GreenhouseLines],
        ),
        (
            ControlChange::UpdateTrigger(1),
            vec![VizId::HeatContent],
            vec![VizId::HeatContent],
        ),
    ];

    for (change, delivered, recomputed) in cases {
        let before = counts(&dash);
        let got = dash.apply(change.clone()).unwrap();
        assert_eq!(got, delivered, "{change:?}");
        assert_only_bumped(&before, &counts(&dash), &recomputed);
    }
}

#[test]
fn update_button_recomputes_heat_content_on_every_press() {
    let mut dash = Dashboard::new(store());
    let first = dash.lane(VizId::HeatContent).clone().unwrap();
    for press in 1..=3u64 {
        assert_eq!(dash.press_update().unwrap(), vec![VizId::HeatContent]);
        assert_eq!(dash.controls().clicks(), press);
        assert_eq!(dash.compute_count(VizId::HeatContent), press + 1);
    }
    // the click count itself does not change the output
    assert_eq!(dash.lane(VizId::HeatContent).clone().unwrap(), first);
}

#[test]
fn stale_click_count_is_rejected_without_side_effects() {
    let mut dash = Dashboard::new(store());
    dash.press_update().unwrap();
    let before = counts(&dash);
    let err = dash.apply(ControlChange::UpdateTrigger(1)).unwrap_err();
    assert!(matches!(err, DashError::InvalidControl { .. }));
    assert_eq!(dash.controls().clicks(), 1);
    assert_eq!(counts(&dash), before);
}

#[test]
fn failing_lane_leaves_other_lanes_alone() {
    let mut dash = Dashboard::new(store());
    let others: Vec<_> = dash
        .lanes()
        .filter(|(id, _)| *id != VizId::Temperature)
        .map(|(id, lane)| (id, lane.clone()))
        .collect();

    dash.apply(ControlChange::SelectedCountry("Atlantis".into()))
        .unwrap();
    let err = dash.lane(VizId::Temperature).clone().unwrap_err();
    assert!(err.is_lookup(), "{err}");

    for (id, lane) in others {
        assert_eq!(dash.lane(id), &lane, "{id}");
    }

    // recovers on the next valid value
    dash.apply(ControlChange::SelectedCountry("Peru".into()))
        .unwrap();
    assert!(dash.lane(VizId::Temperature).is_ok());
}

#[test]
fn unknown_season_and_gas_fail_their_lanes_only() {
    let mut dash = Dashboard::new(store());
    dash.apply(ControlChange::SelectedSeason("Monsoon".into()))
        .unwrap();
    dash.apply(ControlChange::SelectedGas("SF6".into())).unwrap();
    assert!(dash.lane(VizId::Seasons).as_ref().unwrap_err().is_lookup());
    assert!(dash.lane(VizId::GreenhouseLines).as_ref().unwrap_err().is_lookup());
    assert!(dash.lane(VizId::GreenhouseArea).is_ok());
    assert!(dash.lane(VizId::Temperature).is_ok());
}

#[test]
fn absent_year_is_an_empty_map_not_an_error() {
    let mut dash = Dashboard::new(store());
    dash.apply(ControlChange::SelectedYear(1850)).unwrap();
    match dash.lane(VizId::Deforestation).as_deref() {
        Ok(Figure::Choropleth(map)) => {
            assert_eq!(map.year, 1850);
            assert!(map.regions.is_empty());
        }
        other => panic!("expected empty map, got {other:?}"),
    }
}

#[test]
fn area_is_invariant_under_gas_changes() {
    let mut dash = Dashboard::new(store());
    let area = dash.lane(VizId::GreenhouseArea).clone().unwrap();
    for gas in ["CH4", "N2O", "CFC12", "CFC11", "15-minor", "CO2"] {
        dash.apply(ControlChange::SelectedGas(gas.into())).unwrap();
        let now = dash.lane(VizId::GreenhouseArea).clone().unwrap();
        assert_eq!(now, area, "after {gas}");
    }
    assert_eq!(dash.compute_count(VizId::GreenhouseArea), 1);
}

#[test]
fn relayout_redelivers_memoized_maps() {
    let mut dash = Dashboard::new(store());
    let before = counts(&dash);
    let got = dash.signal(ViewSignal::Relayout(VizId::Emissions1956));
    assert_eq!(got, vec![VizId::Emissions1956, VizId::Emissions2021]);
    assert_eq!(counts(&dash), before);
}

#[test]
fn relayout_from_a_non_map_reaches_nothing() {
    let mut dash = Dashboard::new(store());
    let before = counts(&dash);
    assert!(dash.signal(ViewSignal::Relayout(VizId::Temperature)).is_empty());
    assert_eq!(counts(&dash), before);
}

#[test]
fn numeric_country_offered_by_the_dropdown_resolves() {
    let mut store = (*store()).clone();
    let mut rows: Vec<Vec<Cell>> = store.temperature.rows().map(|r| r.to_vec()).collect();
    let mut extra = rows[0].clone();
    extra[1] = Cell::parse("1990");
    rows.push(extra);
    store.temperature = Table::new(
        store.temperature.name().to_string(),
        store.temperature.columns().to_vec(),
        rows,
    )
    .unwrap();

    let mut dash = Dashboard::new(Arc::new(store));
    assert!(dash.options().countries.iter().any(|c| c == "1990"));
    dash.apply(ControlChange::SelectedCountry("1990".into()))
        .unwrap();
    let fig = dash.lane(VizId::Temperature).clone().unwrap();
    assert_eq!(fig.series()[0].name, "1990");
}

#[test]
fn sessions_share_one_option_index() {
    let first = Dashboard::new(store());
    let second = first.new_session();
    assert!(std::ptr::eq(first.options(), second.options()));
    assert!(std::ptr::eq(first.store(), second.store()));
}

#[test]
fn sessions_over_one_store_do_not_share_controls() {
    let template = Dashboard::new(store());
    let handles: Vec<_> = ["Chad", "Peru"]
        .into_iter()
        .map(|country| {
            let mut dash = template.new_session();
            thread::spawn(move || {
                dash.apply(ControlChange::SelectedCountry(country.into()))
                    .unwrap();
                let fig = dash.lane(VizId::Temperature).clone().unwrap();
                (dash.controls().country().to_string(), fig.series()[0].name.clone())
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], ("Chad".to_string(), "Chad".to_string()));
    assert_eq!(results[1], ("Peru".to_string(), "Peru".to_string()));

    // the template session still sees the defaults
    assert_eq!(template.controls().country(), "India");
}
