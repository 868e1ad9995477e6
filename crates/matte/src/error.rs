use std::path::PathBuf;

use thiserror::Error;

use crate::io::OutputFormat;

#[derive(Error, Debug)]
pub enum MatteError {
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("Invalid threshold configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not read image at {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not decode image bytes: {0}")]
    DecodeBytes(#[source] image::ImageError),

    #[error("Failed to encode image as {format}: {source}")]
    Encode {
        format: OutputFormat,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatteError {
    /// True for errors raised while producing output bytes or files.
    pub fn is_encode_error(&self) -> bool {
        matches!(self, Self::Encode { .. } | Self::Write { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatteError>;
