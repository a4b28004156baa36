//! svg-pixel-csv - dump the visible pixels of an image to CSV
//!
//! The pipeline has three steps, run in order:
//!
//! 1. [`raster`]: render an SVG document to a PNG (optional, off by default)
//! 2. [`extract`]: scan a raster image in row-major order, keeping pixels
//!    with alpha greater than zero
//! 3. [`table`]: write those pixels to CSV under the header
//!    `x,y,r,g,b,opacity`
//!
//! # Example
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use svg_pixel_csv::{extract::Bitmap, table};
//!
//! let mut image = RgbaImage::new(2, 1);
//! image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
//!
//! let mut out = Vec::new();
//! table::write_records_to(&Bitmap::from_rgba(image), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "x,y,r,g,b,opacity\r\n0,0,255,0,0,1.0\r\n");
//! ```

pub mod config;
pub mod extract;
pub mod raster;
pub mod table;

pub use config::{ConfigError, PipelineConfig};
pub use extract::{extract_records, Bitmap, ExtractError, Opacity, PixelRecord};
pub use raster::{rasterize, rasterize_file, RasterError, RasterOptions};
pub use table::{read_records, write_records, TableError};

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

/// Errors that can occur during a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Error while rendering the SVG
    #[error("rasterization failed: {0}")]
    Raster(#[from] RasterError),

    /// Error while loading or scanning the image
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Error while writing the CSV
    #[error("CSV output failed: {0}")]
    Table(#[from] TableError),
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of data rows written
    pub records: usize,
    /// Where the CSV was written
    pub csv_output: PathBuf,
}

/// Run the pipeline described by `config`
///
/// Rasterizes `svg_input` into `png_path` when `config.rasterize` is set,
/// then scans `png_path` and writes the visible pixels to `csv_output`.
///
/// # Example
///
/// ```rust,no_run
/// use svg_pixel_csv::{run, PipelineConfig};
///
/// let summary = run(&PipelineConfig::default()).unwrap();
/// println!("Data saved to {}", summary.csv_output.display());
/// ```
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    if config.rasterize {
        info!(svg = %config.svg_input.display(), "rasterizing");
        rasterize_file(&config.svg_input, &config.png_path, &config.raster)?;
    }

    info!(png = %config.png_path.display(), "extracting pixels");
    let bitmap = Bitmap::open(&config.png_path)?;

    info!(csv = %config.csv_output.display(), "writing records");
    let records = write_records(&bitmap, &config.csv_output)?;

    info!(records, "done");
    Ok(RunSummary {
        records,
        csv_output: config.csv_output.clone(),
    })
}
