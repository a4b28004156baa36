//! svg-pixel-csv CLI
//!
//! Usage:
//!   svg-pixel-csv [OPTIONS]
//!   svg-pixel-csv rasterize <SVG> <PNG> [--scale <FACTOR>]
//!
//! With no arguments, scans `dvd-logo-3.png` and writes `output.csv`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use svg_pixel_csv::{rasterize_file, run, PipelineConfig, RasterOptions};

#[derive(Parser)]
#[command(name = "svg-pixel-csv")]
#[command(about = "Write the visible pixels of an image to CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Pipeline configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SVG input, rendered only with --rasterize
    #[arg(long)]
    svg: Option<PathBuf>,

    /// PNG image to scan
    #[arg(short, long)]
    png: Option<PathBuf>,

    /// CSV destination
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rasterize the SVG into the PNG path before scanning
    #[arg(short, long)]
    rasterize: bool,

    /// Rasterization scale factor
    #[arg(long)]
    scale: Option<f32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render an SVG to PNG without scanning it
    Rasterize {
        /// SVG document to render
        svg: PathBuf,

        /// PNG destination
        png: PathBuf,

        /// Scale factor applied to the document's size
        #[arg(long)]
        scale: Option<f32>,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    if let Some(Command::Rasterize { svg, png, scale }) = &cli.command {
        let options = raster_options(&config, *scale);
        if let Err(e) = rasterize_file(svg, png, &options) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        println!("Rendered {} to {}", svg.display(), png.display());
        return;
    }

    let config = apply_overrides(config, &cli);

    match run(&config) {
        Ok(summary) => {
            println!("Data saved to {}", summary.csv_output.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Command-line flags take precedence over the config file
fn apply_overrides(mut config: PipelineConfig, cli: &Cli) -> PipelineConfig {
    if let Some(svg) = &cli.svg {
        config = config.with_svg_input(svg);
    }
    if let Some(png) = &cli.png {
        config = config.with_png_path(png);
    }
    if let Some(output) = &cli.output {
        config = config.with_csv_output(output);
    }
    if cli.rasterize {
        config = config.with_rasterize(true);
    }
    if let Some(scale) = cli.scale {
        config.raster = config.raster.with_scale(scale);
    }
    config
}

/// Raster options for the `rasterize` subcommand: config file, then `--scale`
fn raster_options(config: &PipelineConfig, scale: Option<f32>) -> RasterOptions {
    match scale {
        Some(scale) => config.raster.clone().with_scale(scale),
        None => config.raster.clone(),
    }
}

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}
