use std::{
    fs,
    io::Cursor,
    path::Path,
};

use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use tracing::{debug, info};

use crate::error::{MatteError, Result};

/// Lossless output formats that keep the alpha channel
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Png,
    Tiff,
}

impl OutputFormat {
    /// Pick a format from the file extension, falling back to PNG
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match ImageFormat::from_path(path.as_ref()) {
            Ok(ImageFormat::Tiff) => Self::Tiff,
            _ => Self::Png,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Decode an image file, detecting the format from its content
pub fn decode<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let decode_error = |source| MatteError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?;
    let image = reader.decode().map_err(decode_error)?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );
    Ok(image)
}

/// Decode an in-memory image
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(MatteError::DecodeBytes)
}

/// Encode a raster into an in-memory buffer
pub fn encode_to_vec(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format.image_format())
        .map_err(|source| MatteError::Encode { format, source })?;
    Ok(buffer.into_inner())
}

/// Encode a raster and write it to `path`
pub fn encode<P: AsRef<Path>>(image: &RgbaImage, path: P, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_to_vec(image, format)?;
    fs::write(path, &bytes).map_err(|source| MatteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), %format, bytes = bytes.len(), "wrote image");
    Ok(())
}
