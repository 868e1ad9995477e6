pub mod builder;

use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::{
    error::{MatteError, Result},
    traits::{BackgroundClassifier, ExecutionStrategy},
    types::{ColorPolicy, MatteReport, Predicate, ThresholdConfig},
};

/// Makes background-colored pixels transparent.
///
/// Each pixel is classified from its own R, G and B values only, so the
/// result does not depend on traversal order. Non-background pixels are
/// never modified.
pub struct BackgroundMatteFilter {
    threshold: ThresholdConfig,
    predicate: Predicate,
    policy: ColorPolicy,
    classifier: Box<dyn BackgroundClassifier>,
    custom_classifier: bool,
    strategy: Box<dyn ExecutionStrategy>,
}

impl BackgroundMatteFilter {
    /// Create a new filter builder
    pub fn builder() -> builder::FilterBuilder {
        builder::FilterBuilder::new()
    }

    /// Create a filter with the given threshold and default settings otherwise
    pub fn new(threshold: ThresholdConfig) -> Result<Self> {
        Self::builder().threshold(threshold).build()
    }

    pub(crate) fn from_parts(
        threshold: ThresholdConfig,
        predicate: Predicate,
        policy: ColorPolicy,
        classifier: Box<dyn BackgroundClassifier>,
        custom_classifier: bool,
        strategy: Box<dyn ExecutionStrategy>,
    ) -> Self {
        Self {
            threshold,
            predicate,
            policy,
            classifier,
            custom_classifier,
            strategy,
        }
    }

    /// True when classification comes from a classifier set through
    /// [`builder::FilterBuilder::set_classifier`]; threshold and predicate
    /// are then unused.
    pub fn has_custom_classifier(&self) -> bool {
        self.custom_classifier
    }

    pub fn threshold(&self) -> &ThresholdConfig {
        &self.threshold
    }

    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    pub fn color_policy(&self) -> ColorPolicy {
        self.policy
    }

    /// Classify a single color with this filter's rule
    pub fn is_background(&self, rgb: [u8; 3]) -> bool {
        self.classifier.is_background(rgb)
    }

    /// Run the filter over a decoded raster
    pub fn apply(&self, image: DynamicImage) -> Result<RgbaImage> {
        self.apply_with_report(image).map(|report| report.image)
    }

    /// Run the filter and keep the number of cleared pixels
    pub fn apply_with_report(&self, image: DynamicImage) -> Result<MatteReport> {
        let mut rgba = into_rgba_raster(image)?;
        let background_pixels = self.apply_rgba_in_place(&mut rgba)?;
        Ok(MatteReport {
            image: rgba,
            background_pixels,
        })
    }

    /// Run the filter over an RGBA raster in place
    pub fn apply_rgba_in_place(&self, image: &mut RgbaImage) -> Result<usize> {
        ensure_not_empty(image.width(), image.height())?;

        let cleared = self.strategy.execute(image, self.classifier.as_ref(), self.policy);
        debug!(
            strategy = self.strategy.name(),
            width = image.width(),
            height = image.height(),
            cleared,
            "matte pass complete"
        );
        Ok(cleared)
    }

    /// Get information about the filter configuration
    pub fn info(&self) -> String {
        let rule = if self.custom_classifier {
            "custom classifier".to_string()
        } else {
            format!(
                "{:?}..={:?} ({})",
                self.threshold.lower, self.threshold.upper, self.predicate
            )
        };
        format!(
            "BackgroundMatteFilter: {}, color policy {}, {} strategy",
            rule,
            self.policy,
            self.strategy.name()
        )
    }
}

impl Default for BackgroundMatteFilter {
    fn default() -> Self {
        builder::FilterBuilder::build_default()
    }
}

impl std::fmt::Debug for BackgroundMatteFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("BackgroundMatteFilter");
        if self.custom_classifier {
            out.field("classifier", &"custom");
        } else {
            out.field("threshold", &self.threshold)
                .field("predicate", &self.predicate);
        }
        out.field("policy", &self.policy)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

fn ensure_not_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MatteError::InvalidRaster(format!(
            "raster is empty ({width}x{height})"
        )));
    }
    Ok(())
}

/// Check the channel layout and widen to 8-bit RGBA, adding an opaque
/// alpha channel where the input has none.
fn into_rgba_raster(image: DynamicImage) -> Result<RgbaImage> {
    let color = image.color();
    if color.channel_count() < 3 {
        return Err(MatteError::InvalidRaster(format!(
            "expected at least 3 channels, got {} ({:?})",
            color.channel_count(),
            color
        )));
    }
    ensure_not_empty(image.width(), image.height())?;

    Ok(match image {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.into_rgba8(),
    })
}
