use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use climate_trends::storage::{self, DatasetFiles};
use climate_trends::{ControlChange, Dashboard, Figure, VizId, stats, viz};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "climate-trends",
    version,
    about = "Compute, export & plot the climate dashboard's visualizations"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every visualization (and optionally save, plot, and print stats).
    Render(RenderArgs),
    /// List the values each dropdown accepts.
    Options(DataArgs),
    /// Print the solution hierarchy as an indented outline.
    Outline(DataArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlotFormat {
    Svg,
    Png,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Directory holding the dataset files.
    #[arg(short = 'd', long, default_value = "dataset")]
    data_dir: PathBuf,
    /// JSON manifest overriding dataset file names.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Country for the temperature series.
    #[arg(long)]
    country: Option<String>,
    /// Year for the deforestation map.
    #[arg(long)]
    year: Option<i32>,
    /// Season for the seasonal series ("Combined" for all).
    #[arg(long)]
    season: Option<String>,
    /// Gas to emphasize in the greenhouse chart.
    #[arg(long)]
    gas: Option<String>,
    /// Set a control by name, e.g. selected_year=2000 (repeatable, applied last).
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
    /// Write one file per visualization into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Export format for --out-dir.
    #[arg(long, value_enum, default_value_t = OutFormat::Json)]
    format: OutFormat,
    /// Also draw line, area and bar figures into --out-dir.
    #[arg(long, value_enum)]
    plot: Option<PlotFormat>,
    /// Width of the plots (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plots (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Locale for tick labels (e.g. en, de).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Print per-series statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Options(args) => cmd_options(args),
        Command::Outline(args) => cmd_outline(args),
    }
}

fn open_dashboard(args: &DataArgs) -> Result<Dashboard> {
    let files = match &args.manifest {
        Some(path) => storage::load_manifest(path)?,
        None => DatasetFiles::default(),
    };
    let store = storage::load_store(&args.data_dir, &files)?;
    Ok(Dashboard::new(Arc::new(store)))
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut dash = open_dashboard(&args.data)?;

    let mut changes = Vec::new();
    if let Some(c) = args.country {
        changes.push(ControlChange::SelectedCountry(c));
    }
    if let Some(y) = args.year {
        changes.push(ControlChange::SelectedYear(y));
    }
    if let Some(s) = args.season {
        changes.push(ControlChange::SelectedSeason(s));
    }
    if let Some(g) = args.gas {
        changes.push(ControlChange::SelectedGas(g));
    }
    for pair in &args.set {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("--set expects NAME=VALUE, got {pair:?}");
        };
        changes.push(ControlChange::parse(name, value)?);
    }
    for change in changes {
        dash.apply(change)?;
    }

    if let Some(dir) = args.out_dir.as_ref() {
        std::fs::create_dir_all(dir)?;
    }

    let mut failed = 0usize;
    for (id, lane) in dash.lanes() {
        let fig = match lane {
            Ok(fig) => fig,
            Err(err) => {
                failed += 1;
                eprintln!("{id}: {err}");
                continue;
            }
        };
        println!("{id}: {}", describe(fig));

        if let Some(dir) = args.out_dir.as_ref() {
            let path = export(fig, id, dir, args.format)?;
            eprintln!("Saved {} to {}", id, path.display());

            if let Some(plot) = args.plot
                && viz::is_drawable(fig)
            {
                let ext = match plot {
                    PlotFormat::Svg => "svg",
                    PlotFormat::Png => "png",
                };
                let plot_path = dir.join(format!("{id}.{ext}"));
                match viz::render_figure(
                    fig,
                    &plot_path,
                    args.width,
                    args.height,
                    &args.locale,
                    id.title(),
                ) {
                    Ok(()) => eprintln!("Wrote plot to {}", plot_path.display()),
                    Err(err) => eprintln!("{id}: plot failed: {err}"),
                }
            }
        }

        if args.stats {
            for s in stats::summarize(fig) {
                println!(
                    "  {}  count={} missing={}  min={} max={} mean={} median={}",
                    s.series,
                    s.count,
                    s.missing,
                    fmt_opt(s.min),
                    fmt_opt(s.max),
                    fmt_opt(s.mean),
                    fmt_opt(s.median)
                );
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} visualization(s) failed; the others were produced");
    }
    Ok(())
}

fn export(fig: &Figure, id: VizId, dir: &Path, format: OutFormat) -> Result<PathBuf> {
    let path = match format {
        OutFormat::Csv => {
            let p = dir.join(format!("{id}.csv"));
            storage::save_figure_csv(fig, &p)?;
            p
        }
        OutFormat::Json => {
            let p = dir.join(format!("{id}.json"));
            storage::save_figure_json(fig, &p)?;
            p
        }
    };
    Ok(path)
}

fn describe(fig: &Figure) -> String {
    match fig {
        Figure::Lines { series } => {
            let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
            format!("{} series ({})", series.len(), names.join(", "))
        }
        Figure::Area { series } => format!("area, {} points", series.points.len()),
        Figure::Choropleth(map) => format!("{} regions for {}", map.regions.len(), map.year),
        Figure::Bars { bars } => format!("{} bars", bars.len()),
        Figure::Pie { slices } => format!("{} categories", slices.len()),
        Figure::Outline { text } => format!("{} lines", text.lines().count()),
    }
}

fn cmd_options(args: DataArgs) -> Result<()> {
    let dash = open_dashboard(&args)?;
    let opts = dash.options();
    println!("selected_country: {}", opts.countries.join(", "));
    let years: Vec<String> = opts.years.iter().map(|y| y.to_string()).collect();
    println!("selected_year: {}", years.join(", "));
    println!("selected_season: {}", opts.seasons.join(", "));
    println!("selected_gas: {}", opts.gases.join(", "));
    Ok(())
}

fn cmd_outline(args: DataArgs) -> Result<()> {
    let dash = open_dashboard(&args)?;
    match dash.lane(VizId::Solutions) {
        Ok(fig) => {
            if let Figure::Outline { text } = fig.as_ref() {
                println!("{text}");
            }
            Ok(())
        }
        Err(err) => Err(err.clone().into()),
    }
}
