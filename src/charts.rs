//! Chart-ready figures: the only values that cross into a renderer.

use serde::{Deserialize, Serialize};

/// Rendering weight of a series. Never changes the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Normal,
    Emphasized,
    Muted,
}

/// One `(year, value)` observation. Missing cells keep their slot as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: i32,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub emphasis: Emphasis,
    pub points: Vec<XyPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<XyPoint>) -> Self {
        Self {
            name: name.into(),
            emphasis: Emphasis::Normal,
            points,
        }
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.x).collect()
    }
}

/// One region of a choropleth map. Codes are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionValue {
    pub code: Option<String>,
    pub value: Option<f64>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choropleth {
    pub year: i32,
    pub regions: Vec<RegionValue>,
}

/// Sign class of a bar relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    BelowBaseline,
    AtOrAboveBaseline,
}

impl Tone {
    pub fn of(value: f64) -> Tone {
        if value < 0.0 {
            Tone::BelowBaseline
        } else {
            Tone::AtOrAboveBaseline
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub value: f64,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub category: String,
    pub percentage: f64,
}

/// Everything a renderer may be asked to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Lines { series: Vec<Series> },
    Area { series: Series },
    Choropleth(Choropleth),
    Bars { bars: Vec<Bar> },
    Pie { slices: Vec<Slice> },
    Outline { text: String },
}

impl Figure {
    /// XY series carried by the figure (empty for non-XY figures).
    pub fn series(&self) -> Vec<&Series> {
        match self {
            Figure::Lines { series } => series.iter().collect(),
            Figure::Area { series } => vec![series],
            _ => Vec::new(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Figure::Lines { .. } => "lines",
            Figure::Area { .. } => "area",
            Figure::Choropleth(_) => "choropleth",
            Figure::Bars { .. } => "bars",
            Figure::Pie { .. } => "pie",
            Figure::Outline { .. } => "outline",
        }
    }
}
