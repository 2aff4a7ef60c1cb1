//! Error types for the host side: sprite assets and configuration.
//!
//! The sphere pipeline itself never fails once it has a decoded image.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("sprite not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to decode sprite {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("sprite {width}x{height} has mismatched pixel data")]
    PixelData { width: u32, height: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {flag}: {value}")]
    InvalidArgument { flag: String, value: String },
}
