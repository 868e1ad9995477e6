use image::RgbaImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::error::{MatteError, Result};

/// Default per-channel lower bound of the background box.
pub const DEFAULT_LOWER: [u8; 3] = [240, 240, 240];
/// Default per-channel upper bound of the background box.
pub const DEFAULT_UPPER: [u8; 3] = [255, 255, 255];

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Per-channel bounds of the color box treated as background.
///
/// Bounds apply to R, G and B independently. Alpha never takes part in
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThresholdConfig {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ThresholdConfig {
    /// Create a validated threshold box.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self> {
        let config = Self { lower, upper };
        config.validate()?;
        Ok(config)
    }

    /// Create a threshold box from unchecked integers, rejecting anything
    /// outside `0..=255`.
    pub fn from_raw(lower: [i64; 3], upper: [i64; 3]) -> Result<Self> {
        let lower = narrow_bounds("lower", lower)?;
        let upper = narrow_bounds("upper", upper)?;
        Self::new(lower, upper)
    }

    /// Check that every lower bound is at most its upper bound.
    pub fn validate(&self) -> Result<()> {
        for (channel, name) in CHANNEL_NAMES.iter().enumerate() {
            if self.lower[channel] > self.upper[channel] {
                return Err(MatteError::InvalidConfig(format!(
                    "{} lower bound {} exceeds upper bound {}",
                    name, self.lower[channel], self.upper[channel]
                )));
            }
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
        }
    }
}

fn narrow_bounds(label: &str, raw: [i64; 3]) -> Result<[u8; 3]> {
    let mut out = [0u8; 3];
    for (channel, value) in raw.iter().enumerate() {
        out[channel] = u8::try_from(*value).map_err(|_| {
            MatteError::InvalidConfig(format!(
                "{} {} bound {} is outside 0..=255",
                CHANNEL_NAMES[channel], label, value
            ))
        })?;
    }
    Ok(out)
}

/// How a channel value is compared against the lower bound.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Predicate {
    /// `lower <= value <= upper`
    #[default]
    Inclusive,
    /// `lower < value <= upper`
    Strict,
}

/// What happens to the color channels of a pixel classified as background.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorPolicy {
    /// Keep the original RGB values, only alpha changes.
    #[default]
    Preserve,
    /// Reset RGB to (255, 255, 255).
    White,
    /// Reset RGB to (0, 0, 0).
    Black,
}

impl ColorPolicy {
    /// Write a transparent pixel according to the policy.
    #[inline]
    pub fn clear(self, pixel: &mut [u8]) {
        match self {
            Self::Preserve => {}
            Self::White => pixel[..3].fill(u8::MAX),
            Self::Black => pixel[..3].fill(0),
        }
        pixel[3] = 0;
    }
}

/// Output of a single filter pass.
#[derive(Debug, Clone)]
pub struct MatteReport {
    pub image: RgbaImage,
    /// Number of pixels classified as background
    pub background_pixels: usize,
}

impl MatteReport {
    pub fn total_pixels(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    /// Fraction of the raster that became transparent.
    pub fn background_ratio(&self) -> f64 {
        match self.total_pixels() {
            0 => 0.0,
            total => self.background_pixels as f64 / total as f64,
        }
    }
}
