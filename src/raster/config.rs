//! Configuration for SVG rasterization

use serde::Deserialize;

/// Options controlling how an SVG is rendered to pixels
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterOptions {
    /// Multiplier applied to the document's intrinsic size
    pub scale: f32,

    /// Whether to load system fonts so `<text>` elements render
    pub load_system_fonts: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            load_system_fonts: true,
        }
    }
}

impl RasterOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable system font loading
    pub fn with_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RasterOptions::default();
        assert_eq!(options.scale, 1.0);
        assert!(options.load_system_fonts);
    }

    #[test]
    fn test_builder_pattern() {
        let options = RasterOptions::new().with_scale(2.5).with_system_fonts(false);
        assert_eq!(options.scale, 2.5);
        assert!(!options.load_system_fonts);
    }
}
