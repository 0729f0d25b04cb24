//! Reference renderer: draws chart-ready figures to **SVG** or **PNG**.
//!
//! - Line figures: one stroke per series, emphasized series drawn heavier
//! - Area figures: filled down to zero
//! - Bar figures: one bar per label, colored by tone
//! - Locale-aware tick labels (`30,000` vs `30.000`)
//!
//! Maps, pies and outlines need a geographic or text surface and are left to
//! other renderers (export them as JSON instead).

pub mod text;
pub mod util;

use crate::charts::{Bar, Emphasis, Figure, Series, Tone};
use crate::error::DashError;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{AreaSeries, LineSeries};
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use text::truncate_to_width;
use util::{compute_left_label_area_px, format_tick, map_locale, office_color};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const BELOW_COLOR: RGBColor = RGBColor(214, 39, 40);
const ABOVE_COLOR: RGBColor = RGBColor(44, 160, 44);
const MARGIN: u32 = 16;
const LEGEND_FONT_PX: u32 = 14;

/// True when the reference renderer can draw this figure.
pub fn is_drawable(figure: &Figure) -> bool {
    matches!(
        figure,
        Figure::Lines { .. } | Figure::Area { .. } | Figure::Bars { .. }
    )
}

/// Render `figure` to `out_path`; `.svg` selects SVG, anything else PNG.
pub fn render_figure<P: AsRef<Path>>(
    figure: &Figure,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    title: &str,
) -> Result<()> {
    if !is_drawable(figure) {
        return Err(DashError::Unsupported(format!(
            "{} figures cannot be drawn as images; export them as JSON",
            figure.kind_name()
        ))
        .into());
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_figure(root, figure, locale_tag, title)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_figure(root, figure, locale_tag, title)
    }
}

fn draw_figure<DB>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    locale_tag: &str,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    match figure {
        Figure::Lines { series } => draw_xy(&root, series, false, locale_tag, title)?,
        Figure::Area { series } => {
            draw_xy(&root, std::slice::from_ref(series), true, locale_tag, title)?
        }
        Figure::Bars { bars } => draw_bars(&root, bars, locale_tag, title)?,
        _ => unreachable!("checked by is_drawable"),
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Contiguous runs of present values; a missing value breaks the line.
fn segments(series: &Series) -> Vec<Vec<(f64, f64)>> {
    let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut cur = Vec::new();
    for p in &series.points {
        match p.y {
            Some(y) => cur.push((p.x as f64, y)),
            None if !cur.is_empty() => out.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn padded(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn draw_xy<DB>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    filled: bool,
    locale_tag: &str,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let present: Vec<(f64, f64)> = series.iter().flat_map(segments).flatten().collect();
    if present.is_empty() {
        return Err(anyhow!("no numeric values to plot"));
    }
    let (x_min, x_max) = padded(
        present.iter().map(|p| p.0).fold(f64::INFINITY, f64::min),
        present.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max),
    );
    let mut y_min = present.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = present.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if filled {
        y_min = y_min.min(0.0);
    }
    let (y_min, y_max) = padded(y_min, y_max);

    let (num_locale, dec_sep) = map_locale(locale_tag);
    let y_label_count = 10usize;
    let left = compute_left_label_area_px(y_min, y_max, y_label_count, 12);
    let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
    let y_label_fmt = |v: &f64| format_tick(*v, num_locale, dec_sep);

    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .caption(title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Value")
        .x_labels(((x_max - x_min) as usize + 1).min(12))
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let legend_px = root.dim_in_pixel().0 / 4;
    for (idx, s) in series.iter().enumerate() {
        let color = office_color(idx);
        let stroke_width = match s.emphasis {
            Emphasis::Emphasized => 3,
            Emphasis::Normal => 2,
            Emphasis::Muted => 1,
        };
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width,
        };
        let label = truncate_to_width(&s.name, LEGEND_FONT_PX, legend_px);
        for (i, seg) in segments(s).into_iter().enumerate() {
            let elem = if filled {
                chart
                    .draw_series(
                        AreaSeries::new(seg, y_min.max(0.0).min(y_max), color.mix(0.20).filled())
                            .border_style(style),
                    )
                    .map_err(|e| anyhow!("{:?}", e))?
            } else {
                chart
                    .draw_series(LineSeries::new(seg, style))
                    .map_err(|e| anyhow!("{:?}", e))?
            };
            // one legend entry per series, not per segment
            if i == 0 {
                elem.label(label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, LEGEND_FONT_PX))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    bars: &[Bar],
    locale_tag: &str,
    title: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    if bars.is_empty() {
        return Err(anyhow!("no bars to plot"));
    }
    let (y_min, y_max) = padded(
        bars.iter().map(|b| b.value).fold(0.0, f64::min),
        bars.iter().map(|b| b.value).fold(0.0, f64::max),
    );
    let (num_locale, dec_sep) = map_locale(locale_tag);
    let y_label_count = 10usize;
    let left = compute_left_label_area_px(y_min, y_max, y_label_count, 12);
    let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
    let x_label_fmt = |x: &f64| {
        let i = x.round();
        if i >= 0.0 && (i as usize) < labels.len() && (x - i).abs() < 1e-6 {
            labels[i as usize].to_string()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |v: &f64| format_tick(*v, num_locale, dec_sep);

    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .caption(title, (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(-0.5f64..(bars.len() as f64 - 0.5), y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Year/Month")
        .y_desc("Anomaly")
        .x_labels(bars.len().min(12))
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, b)| {
            let color = match b.tone {
                Tone::BelowBaseline => BELOW_COLOR,
                Tone::AtOrAboveBaseline => ABOVE_COLOR,
            };
            let x0 = i as f64 - 0.4;
            let x1 = i as f64 + 0.4;
            Rectangle::new([(x0, 0.0f64.min(b.value)), (x1, 0.0f64.max(b.value))], color.filled())
        }))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::XyPoint;

    #[test]
    fn gaps_split_segments() {
        let s = Series::new(
            "x",
            vec![
                XyPoint { x: 1, y: Some(1.0) },
                XyPoint { x: 2, y: None },
                XyPoint { x: 3, y: Some(3.0) },
                XyPoint { x: 4, y: Some(4.0) },
            ],
        );
        let segs = segments(&s);
        assert_eq!(segs, vec![vec![(1.0, 1.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
    }
}
