//! Error types for pixel extraction

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading a bitmap
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The image file could not be opened or decoded
    #[error("failed to load image '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A raw RGBA buffer does not match the declared dimensions
    #[error("pixel buffer of {len} bytes does not fit a {width}x{height} RGBA image")]
    BufferSize { width: u32, height: u32, len: usize },
}

impl ExtractError {
    /// Create a load error for the given path
    pub fn load(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Load {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_display() {
        let err = ExtractError::BufferSize {
            width: 2,
            height: 2,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer of 3 bytes does not fit a 2x2 RGBA image"
        );
    }
}
