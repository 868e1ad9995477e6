use image::RgbaImage;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    traits::{BackgroundClassifier, ExecutionStrategy},
    types::ColorPolicy,
};

const CHANNELS: usize = 4;

/// Below this many pixels the parallel strategy runs sequentially.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 32 * 1024;

#[inline]
fn rgb_of(pixel: &[u8]) -> [u8; 3] {
    [pixel[0], pixel[1], pixel[2]]
}

/// Clear background pixels in a raw RGBA slice holding whole pixels.
fn matte_raw(raw: &mut [u8], classifier: &dyn BackgroundClassifier, policy: ColorPolicy) -> usize {
    let mut cleared = 0;
    for pixel in raw.chunks_exact_mut(CHANNELS) {
        if classifier.is_background(rgb_of(pixel)) {
            policy.clear(pixel);
            cleared += 1;
        }
    }
    cleared
}

/// Pixel-at-a-time traversal
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarStrategy;

impl ExecutionStrategy for ScalarStrategy {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn execute(
        &self,
        image: &mut RgbaImage,
        classifier: &dyn BackgroundClassifier,
        policy: ColorPolicy,
    ) -> usize {
        matte_raw(image, classifier, policy)
    }
}

/// Whole-raster evaluation: build the background mask first, then clear
/// every masked pixel in a second pass
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedStrategy;

impl ExecutionStrategy for MaskedStrategy {
    fn name(&self) -> &'static str {
        "masked"
    }

    fn execute(
        &self,
        image: &mut RgbaImage,
        classifier: &dyn BackgroundClassifier,
        policy: ColorPolicy,
    ) -> usize {
        let mask: Vec<bool> = image
            .chunks_exact(CHANNELS)
            .map(|pixel| classifier.is_background(rgb_of(pixel)))
            .collect();

        let mut cleared = 0;
        for (pixel, _) in image
            .chunks_exact_mut(CHANNELS)
            .zip(mask.iter())
            .filter(|(_, is_background)| **is_background)
        {
            policy.clear(pixel);
            cleared += 1;
        }
        cleared
    }
}

/// Row blocks processed on the rayon pool
#[derive(Debug, Clone, Copy)]
pub struct ParallelStrategy {
    /// Rasters smaller than this run on the calling thread
    pub min_pixels: usize,
    pub rows_per_task: usize,
}

impl Default for ParallelStrategy {
    fn default() -> Self {
        Self {
            min_pixels: PARALLEL_PIXEL_THRESHOLD,
            rows_per_task: 16,
        }
    }
}

impl ExecutionStrategy for ParallelStrategy {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn execute(
        &self,
        image: &mut RgbaImage,
        classifier: &dyn BackgroundClassifier,
        policy: ColorPolicy,
    ) -> usize {
        let (width, height) = image.dimensions();
        let len = width as usize * height as usize;
        if len == 0 || len < self.min_pixels {
            return matte_raw(image, classifier, policy);
        }

        let block = width as usize * CHANNELS * self.rows_per_task.max(1);
        image
            .par_chunks_mut(block)
            .map(|rows| matte_raw(rows, classifier, policy))
            .sum()
    }
}

/// Selectable traversal strategy
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    Scalar,
    #[default]
    Masked,
    Parallel,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn ExecutionStrategy> {
        match self {
            Self::Scalar => Box::new(ScalarStrategy),
            Self::Masked => Box::new(MaskedStrategy),
            Self::Parallel => Box::new(ParallelStrategy::default()),
        }
    }
}
