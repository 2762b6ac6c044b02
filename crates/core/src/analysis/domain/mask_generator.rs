use crate::analysis::domain::luminance_classifier::LuminanceScan;
use crate::shared::constants::{SATURATION_OVERLAY_COLOR, SHADOW_OVERLAY_COLOR};
use crate::shared::overlay_image::OverlayImage;

/// Painted overlay surfaces and their pixel counts for one cycle.
#[derive(Clone, Debug)]
pub struct OverlayMasks {
    pub shadow_mask: OverlayImage,
    pub saturation_mask: OverlayImage,
    pub shadow_pixel_count: usize,
    pub saturation_pixel_count: usize,
}

/// Paints shadow and saturation overlays from the retained face samples.
///
/// The two conditions are independent: a pixel below the shadow threshold
/// that is also saturated paints onto both surfaces. Surfaces start fully
/// transparent every cycle; nothing accumulates across cycles.
pub struct MaskGenerator;

impl MaskGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, scan: &LuminanceScan) -> OverlayMasks {
        let threshold = scan.shadow_threshold();
        let mut shadow_mask = OverlayImage::new(scan.width(), scan.height());
        let mut saturation_mask = OverlayImage::new(scan.width(), scan.height());
        let mut shadow_pixel_count = 0;
        let mut saturation_pixel_count = 0;

        for sample in scan.samples() {
            if sample.luminance < threshold {
                shadow_mask.paint(sample.x, sample.y, SHADOW_OVERLAY_COLOR);
                shadow_pixel_count += 1;
            }
            if sample.saturated {
                saturation_mask.paint(sample.x, sample.y, SATURATION_OVERLAY_COLOR);
                saturation_pixel_count += 1;
            }
        }

        OverlayMasks {
            shadow_mask,
            saturation_mask,
            shadow_pixel_count,
            saturation_pixel_count,
        }
    }
}

impl Default for MaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}
