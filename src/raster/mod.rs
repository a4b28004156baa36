//! SVG rasterization
//!
//! Parses SVG documents with `usvg`, renders them with `resvg` and hands the
//! result back as straight (non-premultiplied) RGBA8 pixels, optionally
//! saving them as PNG.

mod config;

pub use config::RasterOptions;

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while rasterizing an SVG
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to read SVG '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("invalid scale factor {0}: must be finite and positive")]
    InvalidScale(f32),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("failed to write PNG '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Render SVG source to RGBA pixels at its intrinsic size times `options.scale`
pub fn rasterize(svg_data: &[u8], options: &RasterOptions) -> Result<RgbaImage, RasterError> {
    render(svg_data, usvg::Options::default(), options)
}

/// Render an SVG file and save the result as PNG
///
/// Relative references inside the document (images, stylesheets) resolve
/// against the SVG's own directory.
pub fn rasterize_file(
    svg_path: impl AsRef<Path>,
    png_path: impl AsRef<Path>,
    options: &RasterOptions,
) -> Result<(), RasterError> {
    let svg_path = svg_path.as_ref();
    let png_path = png_path.as_ref();

    let svg_data = std::fs::read(svg_path).map_err(|source| RasterError::Read {
        path: svg_path.to_path_buf(),
        source,
    })?;

    let mut usvg_options = usvg::Options::default();
    usvg_options.resources_dir = std::fs::canonicalize(svg_path)
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let image = render(&svg_data, usvg_options, options)?;
    image
        .save_with_format(png_path, image::ImageFormat::Png)
        .map_err(|source| RasterError::Write {
            path: png_path.to_path_buf(),
            source,
        })?;

    info!(
        svg = %svg_path.display(),
        png = %png_path.display(),
        width = image.width(),
        height = image.height(),
        "rasterized SVG"
    );
    Ok(())
}

fn render(
    svg_data: &[u8],
    mut usvg_options: usvg::Options<'_>,
    options: &RasterOptions,
) -> Result<RgbaImage, RasterError> {
    let scale = options.scale;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RasterError::InvalidScale(scale));
    }

    if options.load_system_fonts {
        usvg_options.fontdb_mut().load_system_fonts();
    }

    let tree = usvg::Tree::from_data(svg_data, &usvg_options)?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Canvas { width, height })?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    debug!(width, height, scale, "rendered SVG");

    // tiny-skia stores premultiplied alpha
    let mut buffer = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let color = px.demultiply();
        buffer.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(width, height, buffer).ok_or(RasterError::Canvas { width, height })
}
