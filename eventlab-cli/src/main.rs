//! EventLab CLI — event impact results without the dashboard.
//!
//! Commands:
//! - `summary` / `detail` / `paths` / `ranking` — print a view for a selection
//! - `export` — write the views and a manifest to a directory
//! - `check` — load the results file and print the load report
//! - `sample` — write a deterministic demo results CSV

mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use eventlab_core::sample::{write_sample_csv, DEFAULT_SEED};
use eventlab_core::{
    export_view, load_results, DashboardConfig, DashboardView, LoadError, LoadedResults,
    RankingOrder, Selection,
};

#[derive(Parser)]
#[command(
    name = "eventlab",
    about = "EventLab CLI — inspect, export and check event impact results"
)]
struct Cli {
    /// Config file. Defaults to ./eventlab.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Results file (.xlsx, .csv, .parquet). Overrides the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Asset/event selection; an empty list selects everything on that axis.
#[derive(Args, Debug, Clone, Default)]
struct SelectArgs {
    /// Asset to include (repeatable).
    #[arg(long = "asset")]
    assets: Vec<String>,

    /// Event to include (repeatable).
    #[arg(long = "event")]
    events: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-asset mean statistics.
    Summary {
        #[command(flatten)]
        select: SelectArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Every filtered row.
    Detail {
        #[command(flatten)]
        select: SelectArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Synthetic price path per asset.
    Paths {
        #[command(flatten)]
        select: SelectArgs,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Mean time to peak per asset.
    Ranking {
        #[command(flatten)]
        select: SelectArgs,

        /// Bar order: alphabetical or fastest. Defaults to the config.
        #[arg(long)]
        order: Option<RankingOrder>,

        /// Print JSON instead of a chart.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write summary.csv, detail.csv, paths.csv and manifest.json.
    Export {
        #[command(flatten)]
        select: SelectArgs,

        /// Output directory.
        #[arg(long, default_value = "export")]
        out: PathBuf,
    },
    /// Load the results file and report rejected rows.
    Check {
        /// Treat any rejected row as a load error.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Write a demo results CSV.
    Sample {
        /// Output file.
        #[arg(long, default_value = "event_impact_results.csv")]
        out: PathBuf,

        /// Generator seed.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if let Some(load) = e.downcast_ref::<LoadError>() {
                for line in load.remedy() {
                    eprintln!("  {line}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let Cli {
        config,
        data,
        command,
    } = cli;

    match command {
        // `sample` produces the input file, so it reads neither config nor data.
        Commands::Sample { out: path, seed } => run_sample(&path, seed, out),
        Commands::Summary { select, json } => {
            let view = Inputs::resolve(config.as_deref(), data)?.view(&select)?;
            if json {
                render::write_json(out, &view.summary)
            } else {
                render::summary(out, &view.summary)
            }
        }
        Commands::Detail { select, json } => {
            let view = Inputs::resolve(config.as_deref(), data)?.view(&select)?;
            if json {
                render::write_json(out, &view.detail)
            } else {
                render::detail(out, &view.detail)
            }
        }
        Commands::Paths { select, json } => {
            let view = Inputs::resolve(config.as_deref(), data)?.view(&select)?;
            if json {
                render::write_json(out, &view.paths)
            } else {
                render::paths(out, &view.paths)
            }
        }
        Commands::Ranking {
            select,
            order,
            json,
        } => {
            let inputs = Inputs::resolve(config.as_deref(), data)?;
            let view = inputs.view(&select)?;
            let bars = view.ranking(order.unwrap_or(inputs.config.ranking));
            if json {
                render::write_json(out, &bars)
            } else {
                render::ranking(out, &bars)
            }
        }
        Commands::Export { select, out: dir } => {
            run_export(&Inputs::resolve(config.as_deref(), data)?, &select, &dir, out)
        }
        Commands::Check { strict } => {
            run_check(&Inputs::resolve(config.as_deref(), data)?, strict, out)
        }
    }
}

/// Config plus the results file it (or `--data`) points at.
struct Inputs {
    config: DashboardConfig,
    data_file: PathBuf,
}

impl Inputs {
    fn resolve(config: Option<&Path>, data: Option<PathBuf>) -> Result<Self> {
        let cwd = std::env::current_dir().context("resolve working directory")?;
        let config = DashboardConfig::discover(config, &cwd)?;
        let data_file = data.unwrap_or_else(|| config.data_file.clone());
        Ok(Self { config, data_file })
    }

    fn load(&self) -> Result<LoadedResults, LoadError> {
        let loaded = load_results(&self.data_file, &self.config.load_options())?;
        if !loaded.report.is_clean() {
            log::warn!(
                "{} row(s) rejected from {}; run `eventlab check` for details",
                loaded.report.rejected.len(),
                self.data_file.display()
            );
        }
        Ok(loaded)
    }

    /// Load the results file and compute the view for a selection.
    fn view(&self, select: &SelectArgs) -> Result<DashboardView> {
        let LoadedResults { dataset, .. } = self.load()?;
        let selection = Selection::from_choices(&dataset, &select.assets, &select.events);
        let view = DashboardView::compute(&dataset, &selection);
        if view.detail.is_empty() {
            log::warn!("selection matches no rows");
        }
        Ok(view)
    }
}

fn run_export<W: Write>(
    inputs: &Inputs,
    select: &SelectArgs,
    dir: &Path,
    out: &mut W,
) -> Result<()> {
    let LoadedResults { dataset, .. } = inputs.load()?;
    let selection = Selection::from_choices(&dataset, &select.assets, &select.events);
    let view = DashboardView::compute(&dataset, &selection);
    let written = export_view(dir, &dataset, &selection, &view)
        .with_context(|| format!("export to {}", dir.display()))?;

    writeln!(
        out,
        "Exported {} detail rows, {} assets:",
        view.detail.len(),
        view.summary.len()
    )?;
    for path in [
        &written.summary_csv,
        &written.detail_csv,
        &written.paths_csv,
        &written.manifest,
    ] {
        writeln!(out, "  {}", path.display())?;
    }
    Ok(())
}

fn run_check<W: Write>(inputs: &Inputs, strict: bool, out: &mut W) -> Result<()> {
    let mut opts = inputs.config.load_options();
    opts.strict |= strict;
    let LoadedResults { dataset, report } = load_results(&inputs.data_file, &opts)?;
    render::load_report(out, &report, &dataset)?;
    if !report.is_clean() {
        bail!("{} row(s) rejected", report.rejected.len());
    }
    Ok(())
}

fn run_sample<W: Write>(path: &Path, seed: u64, out: &mut W) -> Result<()> {
    let rows = write_sample_csv(path, seed)
        .with_context(|| format!("write sample to {}", path.display()))?;
    writeln!(out, "Wrote {rows} sample rows to {}", path.display())?;
    Ok(())
}
