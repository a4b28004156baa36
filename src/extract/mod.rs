//! Pixel extraction
//!
//! Loads a raster image as RGBA8 and scans it in row-major order, yielding a
//! [`PixelRecord`] for every pixel whose alpha is greater than zero.
//!
//! The scan walks the raw RGBA buffer directly, four bytes per pixel, and
//! derives `(x, y)` from the pixel index.

mod error;
mod types;

pub use error::ExtractError;
pub use types::{Opacity, ParseOpacityError, PixelRecord};

use std::iter::{Enumerate, FusedIterator};
use std::path::Path;
use std::slice::ChunksExact;

use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// An RGBA8 pixel grid ready for scanning
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    /// Load an image file and convert it to RGBA8
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| ExtractError::load(path, e))?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "loaded image"
        );
        Ok(Self::from_image(image))
    }

    /// Convert a decoded image of any color type to RGBA8
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_rgba8(),
        }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Wrap a raw RGBA8 buffer laid out row by row
    pub fn from_raw(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self, ExtractError> {
        let len = buffer.len();
        RgbaImage::from_raw(width, height, buffer)
            .map(Self::from_rgba)
            .ok_or(ExtractError::BufferSize { width, height, len })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Scan the bitmap, yielding one record per visible pixel
    ///
    /// The iterator borrows the bitmap and can be restarted by calling this
    /// again (or by cloning it before consuming).
    pub fn records(&self) -> Records<'_> {
        Records {
            pixels: self.pixels.as_raw().chunks_exact(4).enumerate(),
            width: self.pixels.width() as usize,
        }
    }

    /// Number of pixels with alpha greater than zero
    pub fn visible_count(&self) -> usize {
        self.pixels
            .as_raw()
            .chunks_exact(4)
            .filter(|px| px[3] > 0)
            .count()
    }
}

impl<'a> IntoIterator for &'a Bitmap {
    type Item = PixelRecord;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.records()
    }
}

/// Row-major iterator over the visible pixels of a [`Bitmap`]
#[derive(Debug, Clone)]
pub struct Records<'a> {
    pixels: Enumerate<ChunksExact<'a, u8>>,
    width: usize,
}

impl Iterator for Records<'_> {
    type Item = PixelRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, px) in self.pixels.by_ref() {
            if px[3] == 0 {
                continue;
            }
            // width > 0 whenever a pixel exists
            let x = (index % self.width) as u32;
            let y = (index / self.width) as u32;
            return Some(PixelRecord::from_rgba(x, y, [px[0], px[1], px[2], px[3]]));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.pixels.len()))
    }
}

impl FusedIterator for Records<'_> {}

/// Load an image and collect its visible pixels
pub fn extract_records(path: impl AsRef<Path>) -> Result<Vec<PixelRecord>, ExtractError> {
    let bitmap = Bitmap::open(path)?;
    let records: Vec<PixelRecord> = bitmap.records().collect();
    debug!(
        pixels = u64::from(bitmap.width()) * u64::from(bitmap.height()),
        visible = records.len(),
        "scanned bitmap"
    );
    Ok(records)
}
