use crate::charts::Figure;
use serde::{Deserialize, Serialize};

/// Summary statistics for one series of a figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub series: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Per-series statistics of an XY figure; bar figures give one summary.
///
/// Maps, pies and outlines have no series and yield nothing.
pub fn summarize(figure: &Figure) -> Vec<Summary> {
    match figure {
        Figure::Bars { bars } => {
            vec![summary_of("bars", bars.iter().map(|b| Some(b.value)))]
        }
        _ => figure
            .series()
            .into_iter()
            .map(|s| summary_of(&s.name, s.points.iter().map(|p| p.y)))
            .collect(),
    }
}

fn summary_of(name: &str, values: impl Iterator<Item = Option<f64>>) -> Summary {
    let mut vals = Vec::new();
    let mut missing = 0;
    for v in values {
        match v {
            Some(v) => vals.push(v),
            None => missing += 1,
        }
    }
    vals.sort_by(|a, b| a.total_cmp(b));
    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        series: name.to_string(),
        count,
        missing,
        min,
        max,
        mean,
        median,
    }
}
