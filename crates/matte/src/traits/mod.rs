use image::RgbaImage;
use crate::types::ColorPolicy;

/// Trait for deciding whether a color belongs to the background
pub trait BackgroundClassifier: Send + Sync {
    /// Classify a single pixel from its red, green and blue values
    fn is_background(&self, rgb: [u8; 3]) -> bool;
}

/// Trait for traversal strategies that apply the matte to a raster
pub trait ExecutionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Clear every background pixel in place and return how many were cleared
    fn execute(
        &self,
        image: &mut RgbaImage,
        classifier: &dyn BackgroundClassifier,
        policy: ColorPolicy,
    ) -> usize;
}
