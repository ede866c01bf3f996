//! gridtool CLI.
//!
//! Rebuilds 2D rasters from gridID-compressed land-surface NetCDF files,
//! exports them as GeoTIFF, and builds AOI gridID lists and surface-data
//! subsets.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use grid_common::IndexRange;
use grid_remap::WindowPolicy;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use gridtool::commands;
use gridtool::{GridtoolConfig, RequestList};

#[derive(Parser, Debug)]
#[command(name = "gridtool")]
#[command(about = "Extract, subset and export gridID land-surface data")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "GRIDTOOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Window and fill flags shared by the raster commands.
#[derive(clap::Args, Debug, Default)]
struct WindowArgs {
    /// Rows to export, 1-based inclusive, e.g. 200:500
    #[arg(long)]
    rows: Option<IndexRange>,

    /// Columns to export, 1-based inclusive, e.g. 150:900
    #[arg(long)]
    cols: Option<IndexRange>,

    /// Clamp windows that extend past the domain instead of failing
    #[arg(long)]
    clamp: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the active-cell mask as mask.tif
    Mask {
        /// Mask file with x, y and gridID
        mask: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Export variables as {variable}.tif
    Extract {
        /// Mask file with x, y and gridID
        mask: PathBuf,

        /// Data file with compressed variables
        data: PathBuf,

        /// Requests as NAME or NAME@T
        #[arg(short, long = "var", value_name = "REQUEST")]
        vars: Vec<String>,

        /// File with one request per line
        #[arg(long)]
        requests: Option<PathBuf>,

        /// Time step for requests that do not give one
        #[arg(short, long)]
        time_step: Option<usize>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Fill value for cells without data
        #[arg(long)]
        fill_value: Option<f64>,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// List the variables in a data file
    Variables {
        /// Data file
        data: PathBuf,
    },

    /// Write the gridIDs of domain cells inside a WKT polygon
    AoiSelect {
        /// 1D domain file with xc, yc and gridID
        domain: PathBuf,

        /// AOI polygon as WKT, or @FILE to read it from a file
        #[arg(long)]
        wkt: String,

        /// AOI name used in the output file name
        #[arg(long)]
        aoi: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Subset a 1D surface-data file to an AOI's gridIDs
    AoiSubset {
        /// 1D surface-data file
        surfdata: PathBuf,

        /// <AOI>_gridID.csv, <AOI>_domain*.nc or <AOI>_gridID.c*.nc
        points: PathBuf,

        /// AOI name (default: taken from the points file name)
        #[arg(long)]
        aoi: Option<String>,

        /// Label between `_surfdata.` and the date stamp
        #[arg(long)]
        label: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    let mut config = GridtoolConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Mask {
            mask,
            out_dir,
            window,
        } => {
            apply_window(&mut config, &window);
            validate(&config)?;
            print_json(&commands::run_mask(&config, &mask, &out_dir)?)
        }

        Command::Extract {
            mask,
            data,
            vars,
            requests,
            time_step,
            out_dir,
            fill_value,
            window,
        } => {
            apply_window(&mut config, &window);
            if let Some(fill) = fill_value {
                config.remap.fill_value = fill;
            }
            validate(&config)?;

            let requests = collect_requests(&vars, requests.as_deref(), time_step)?;
            info!(requests = requests.len(), "Starting export");

            let summary = commands::run_extract(&config, &mask, &data, &out_dir, &requests)?;
            print_json(&summary)
        }

        Command::Variables { data } => print_json(&commands::run_variables(&data)?),

        Command::AoiSelect {
            domain,
            wkt,
            aoi,
            out_dir,
        } => {
            validate(&config)?;
            let wkt = read_wkt(&wkt)?;
            print_json(&commands::run_aoi_select(&config, &domain, &wkt, &aoi, &out_dir)?)
        }

        Command::AoiSubset {
            surfdata,
            points,
            aoi,
            label,
            out_dir,
        } => {
            if let Some(label) = label {
                config.aoi.surfdata_label = label;
            }
            validate(&config)?;
            print_json(&commands::run_aoi_subset(
                &config,
                &surfdata,
                &points,
                aoi.as_deref(),
                &out_dir,
            )?)
        }
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn apply_window(config: &mut GridtoolConfig, window: &WindowArgs) {
    if window.rows.is_some() {
        config.window.rows = window.rows;
    }
    if window.cols.is_some() {
        config.window.cols = window.cols;
    }
    if window.clamp {
        config.remap.window_policy = WindowPolicy::Clamp;
    }
}

fn validate(config: &GridtoolConfig) -> Result<()> {
    if let Err(msg) = config.validate() {
        bail!("invalid configuration: {}", msg);
    }
    Ok(())
}

fn collect_requests(
    vars: &[String],
    file: Option<&Path>,
    time_step: Option<usize>,
) -> Result<RequestList> {
    let mut requests = RequestList::parse(vars)?;
    if let Some(file) = file {
        requests.extend(RequestList::from_file(file)?);
    }
    if requests.is_empty() {
        bail!("no variables requested; pass --var NAME[@T] or --requests FILE");
    }
    Ok(requests.with_default_time_step(time_step))
}

fn read_wkt(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read WKT from {}", path)),
        None => Ok(arg.to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
