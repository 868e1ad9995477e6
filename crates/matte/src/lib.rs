//! # Background Matte Library
//!
//! Turns the near-white background of a raster image transparent by
//! classifying each pixel against a per-channel color box and zeroing the
//! alpha of every match.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: classification and traversal are
//!   separate traits, so custom rules and strategies plug into the same filter
//! - **Predicates**: inclusive (`240..=255`) or strict (`> 240`) bounds
//! - **Color Policies**: keep, whiten or blacken the RGB of cleared pixels
//! - **Execution Strategies**: scalar, masked (whole-raster) or rayon row blocks
//! - **I/O Helpers**: lossless codec wrappers and a sentinel-delimited base64 reporter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matte::{io, BackgroundMatteFilter, OutputFormat};
//!
//! let filter = BackgroundMatteFilter::default();
//! let image = io::decode("logo.jpg")?;
//! let transparent = filter.apply(image)?;
//! io::encode(&transparent, "logo.png", OutputFormat::Png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Filter
//!
//! ```rust,no_run
//! use matte::{BackgroundMatteFilter, ColorPolicy, Predicate, StrategyKind};
//!
//! let filter = BackgroundMatteFilter::builder()
//!     .lower([230, 230, 230])
//!     .predicate(Predicate::Strict)
//!     .color_policy(ColorPolicy::White)
//!     .strategy(StrategyKind::Parallel)
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod filter;
pub mod io;
pub mod settings;

// Re-exports for convenience
pub use error::{MatteError, Result};
pub use types::{ColorPolicy, MatteReport, Predicate, ThresholdConfig};
pub use traits::*;
pub use algorithms::*;
pub use filter::{BackgroundMatteFilter, builder::FilterBuilder};
pub use io::{Base64Reporter, OutputFormat};
pub use settings::MatteSettings;

use image::{DynamicImage, RgbaImage};

/// Make the background of `image` transparent using `threshold` and the
/// default predicate, color policy and strategy.
///
/// The threshold is validated before the raster is inspected.
pub fn remove_background(image: DynamicImage, threshold: &ThresholdConfig) -> Result<RgbaImage> {
    BackgroundMatteFilter::new(*threshold)?.apply(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn create_test_image() -> DynamicImage {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for y in 20..80 {
            for x in 20..80 {
                img.put_pixel(x, y, Rgb([200, 40, 40]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_remove_background_basic() {
        let out = remove_background(create_test_image(), &ThresholdConfig::default())
            .expect("Should process successfully");

        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
        assert_eq!(out.get_pixel(50, 50).0, [200, 40, 40, 255]);
    }

    #[test]
    fn test_settings_to_encoded_output() {
        let filter = MatteSettings::from_toml("background_color = \"black\"\nstrategy = \"scalar\"")
            .expect("Should parse TOML")
            .build_filter()
            .expect("Should build filter");
        let out = filter.apply(create_test_image()).expect("Should process successfully");

        let bytes = io::encode_to_vec(&out, OutputFormat::Png).expect("Should encode");
        let mut reporter = Base64Reporter::new(Vec::new());
        reporter.emit(&bytes).expect("Should write to vec");
        let text = String::from_utf8(reporter.into_inner()).expect("Should be utf-8");
        assert!(text.starts_with("BASE64_START\n"));
        assert!(text.ends_with("\nBASE64_END\n"));

        let decoded = io::decode_bytes(&bytes).expect("Should decode").to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(20, 20).0, [200, 40, 40, 255]);
    }

    #[test]
    fn test_custom_threshold() {
        let threshold = ThresholdConfig::new([190, 30, 30], [210, 50, 50]).expect("Should build threshold");
        let out = remove_background(create_test_image(), &threshold).expect("Should process successfully");
        assert_eq!(out.get_pixel(0, 0)[3], 255);
        assert_eq!(out.get_pixel(50, 50)[3], 0);
    }
}
