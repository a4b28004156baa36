//! Core types produced by the pixel extractor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Pixel opacity quantized to one decimal place
///
/// Stored as a whole number of tenths in `0..=10`, so `Opacity::OPAQUE`
/// displays as `1.0` and a half-transparent pixel as `0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opacity(u8);

/// Error returned when an opacity string cannot be parsed
#[derive(Debug, Error, PartialEq)]
#[error("invalid opacity '{0}': expected a decimal between 0.0 and 1.0")]
pub struct ParseOpacityError(String);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0);
    pub const OPAQUE: Opacity = Opacity(10);

    /// Quantize an 8-bit alpha value: `round(alpha / 255, 1)`
    ///
    /// Computed as `(20 * alpha + 255) / 510` in integers. No alpha in
    /// `0..=255` falls exactly halfway between two tenths, so half-up and
    /// half-to-even agree.
    pub fn from_alpha(alpha: u8) -> Self {
        Self(((u32::from(alpha) * 20 + 255) / 510) as u8)
    }

    /// Build from a count of tenths, rejecting values above 10
    pub fn from_tenths(tenths: u8) -> Option<Self> {
        (tenths <= 10).then_some(Self(tenths))
    }

    /// Number of tenths (`0..=10`)
    pub fn tenths(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl FromStr for Opacity {
    type Err = ParseOpacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ParseOpacityError(s.to_string()))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ParseOpacityError(s.to_string()));
        }
        // only whole tenths round-trip through the writer
        let scaled = value * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > 1e-9 {
            return Err(ParseOpacityError(s.to_string()));
        }
        Ok(Self(tenths as u8))
    }
}

impl Serialize for Opacity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Opacity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One visible pixel: position, color and quantized opacity
///
/// Field order matches the CSV columns `x,y,r,g,b,opacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRecord {
    pub x: u32,
    pub y: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub opacity: Opacity,
}

impl PixelRecord {
    /// Build a record from a pixel position and its RGBA channels
    pub fn from_rgba(x: u32, y: u32, [r, g, b, a]: [u8; 4]) -> Self {
        Self {
            x,
            y,
            r,
            g,
            b,
            opacity: Opacity::from_alpha(a),
        }
    }

    /// Row-major scan position, `(y, x)`
    pub fn scan_key(&self) -> (u32, u32) {
        (self.y, self.x)
    }
}
