//! Control state: the user-facing inputs of one dashboard session.

use crate::error::DashError;
use crate::schema::{self, GASES};
use crate::store::DatasetStore;
use std::collections::BTreeSet;
use std::fmt;

/// Season value that selects every season column at once.
pub const COMBINED: &str = "Combined";

pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_YEAR: i32 = 1990;
pub const DEFAULT_SEASON: &str = COMBINED;
pub const DEFAULT_GAS: &str = "CO2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlName {
    SelectedCountry,
    SelectedYear,
    SelectedSeason,
    SelectedGas,
    UpdateTrigger,
}

impl ControlName {
    pub const ALL: [ControlName; 5] = [
        ControlName::SelectedCountry,
        ControlName::SelectedYear,
        ControlName::SelectedSeason,
        ControlName::SelectedGas,
        ControlName::UpdateTrigger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ControlName::SelectedCountry => "selected_country",
            ControlName::SelectedYear => "selected_year",
            ControlName::SelectedSeason => "selected_season",
            ControlName::SelectedGas => "selected_gas",
            ControlName::UpdateTrigger => "update_trigger",
        }
    }

    pub fn parse(name: &str) -> Option<ControlName> {
        ControlName::ALL
            .into_iter()
            .find(|c| c.as_str() == name.trim())
    }
}

impl fmt::Display for ControlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single control-change event carrying the control's new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChange {
    SelectedCountry(String),
    SelectedYear(i32),
    SelectedSeason(String),
    SelectedGas(String),
    /// New click count of the update button; only the event matters.
    UpdateTrigger(u64),
}

impl ControlChange {
    pub fn control(&self) -> ControlName {
        match self {
            ControlChange::SelectedCountry(_) => ControlName::SelectedCountry,
            ControlChange::SelectedYear(_) => ControlName::SelectedYear,
            ControlChange::SelectedSeason(_) => ControlName::SelectedSeason,
            ControlChange::SelectedGas(_) => ControlName::SelectedGas,
            ControlChange::UpdateTrigger(_) => ControlName::UpdateTrigger,
        }
    }

    /// Build a typed change from a `(control_name, new_value)` pair of strings.
    pub fn parse(name: &str, value: &str) -> Result<ControlChange, DashError> {
        let control = ControlName::parse(name).ok_or_else(|| DashError::InvalidControl {
            name: name.to_string(),
            detail: "no such control".into(),
        })?;
        let bad_value = |expected: &str| DashError::InvalidControl {
            name: control.as_str().to_string(),
            detail: format!("expected {expected}, got {value:?}"),
        };
        let value = value.trim();
        Ok(match control {
            ControlName::SelectedCountry => ControlChange::SelectedCountry(value.to_string()),
            ControlName::SelectedYear => {
                ControlChange::SelectedYear(value.parse().map_err(|_| bad_value("a year"))?)
            }
            ControlName::SelectedSeason => ControlChange::SelectedSeason(value.to_string()),
            ControlName::SelectedGas => ControlChange::SelectedGas(value.to_string()),
            ControlName::UpdateTrigger => ControlChange::UpdateTrigger(
                value.parse().map_err(|_| bad_value("a click count"))?,
            ),
        })
    }
}

/// Current value of every control. One instance per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    country: String,
    year: i32,
    season: String,
    gas: String,
    clicks: u64,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            year: DEFAULT_YEAR,
            season: DEFAULT_SEASON.to_string(),
            gas: DEFAULT_GAS.to_string(),
            clicks: 0,
        }
    }
}

impl ControlState {
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn gas(&self) -> &str {
        &self.gas
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// The change a button press produces.
    pub fn next_click(&self) -> ControlChange {
        ControlChange::UpdateTrigger(self.clicks + 1)
    }

    /// Replace one control's value. The click counter only moves forward.
    pub(crate) fn apply(&mut self, change: ControlChange) -> Result<(), DashError> {
        match change {
            ControlChange::SelectedCountry(v) => self.country = v,
            ControlChange::SelectedYear(v) => self.year = v,
            ControlChange::SelectedSeason(v) => self.season = v,
            ControlChange::SelectedGas(v) => self.gas = v,
            ControlChange::UpdateTrigger(n) => {
                if n <= self.clicks {
                    return Err(DashError::InvalidControl {
                        name: ControlName::UpdateTrigger.as_str().to_string(),
                        detail: format!("click count {n} does not advance past {}", self.clicks),
                    });
                }
                self.clicks = n;
            }
        }
        Ok(())
    }
}

/// Valid values per control, derived once from the loaded datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionIndex {
    pub countries: Vec<String>,
    pub years: Vec<i32>,
    pub seasons: Vec<String>,
    pub gases: Vec<String>,
}

impl OptionIndex {
    pub fn build(store: &DatasetStore) -> Self {
        let countries = distinct_in_order(
            store
                .temperature
                .column(schema::COUNTRY)
                .into_iter()
                .flatten()
                .filter_map(|c| c.label()),
        );
        let years = distinct_in_order(
            store
                .deforestation
                .column(schema::YEAR)
                .into_iter()
                .flatten()
                .filter_map(|c| c.as_i32()),
        );
        let mut seasons = vec![COMBINED.to_string()];
        seasons.extend(
            store
                .seasons
                .columns()
                .iter()
                .filter(|c| c.as_str() != schema::YEAR && c.as_str() != COMBINED)
                .cloned(),
        );
        Self {
            countries,
            years,
            seasons,
            gases: GASES.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Reject a value no dropdown could have produced.
    ///
    /// Years are never rejected: an absent year is a valid, empty map.
    pub fn check(&self, control: ControlName, value: &str) -> Result<(), DashError> {
        let known = match control {
            ControlName::SelectedCountry => &self.countries,
            ControlName::SelectedSeason => &self.seasons,
            ControlName::SelectedGas => &self.gases,
            ControlName::SelectedYear | ControlName::UpdateTrigger => return Ok(()),
        };
        if known.iter().any(|k| k == value) {
            Ok(())
        } else {
            Err(DashError::lookup(control.as_str(), value))
        }
    }
}

fn distinct_in_order<T: Ord + Clone>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items.filter(|i| seen.insert(i.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let s = ControlState::default();
        assert_eq!(s.country(), "India");
        assert_eq!(s.year(), 1990);
        assert_eq!(s.season(), "Combined");
        assert_eq!(s.gas(), "CO2");
        assert_eq!(s.clicks(), 0);
    }

    #[test]
    fn parse_typed_changes() {
        assert_eq!(
            ControlChange::parse("selected_year", " 2001 ").unwrap(),
            ControlChange::SelectedYear(2001)
        );
        assert!(matches!(
            ControlChange::parse("selected_year", "soon"),
            Err(DashError::InvalidControl { .. })
        ));
        assert!(matches!(
            ControlChange::parse("selected_colour", "red"),
            Err(DashError::InvalidControl { .. })
        ));
    }

    #[test]
    fn updates_replace_and_clicks_advance() {
        let mut s = ControlState::default();
        s.apply(ControlChange::SelectedCountry("Chad".into())).unwrap();
        assert_eq!(s.country(), "Chad");
        s.apply(s.next_click()).unwrap();
        assert_eq!(s.clicks(), 1);
        assert!(s.apply(ControlChange::UpdateTrigger(1)).is_err());
        assert_eq!(s.clicks(), 1);
    }
}
