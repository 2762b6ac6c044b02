//! Per-pixel luminance/saturation classification with an adaptive
//! shadow threshold.
//!
//! The scan walks the full frame once, row-major. Face pixels (per the
//! mask) are retained as samples for the mask generator; background
//! pixels only feed running counters, so memory stays bounded by the
//! face area regardless of frame size.

use crate::masking::domain::face_mask::FaceMask;
use crate::shared::constants::{
    LUMA_WEIGHT_BLUE, LUMA_WEIGHT_GREEN, LUMA_WEIGHT_RED, MEDIAN_SATURATION_LIMIT,
    RED_SATURATION_LIMIT, SHADOW_THRESHOLD_FLOOR, WELL_LIT_AVERAGE_ILLUMINANCE,
};
use crate::shared::frame::Frame;

/// One retained face-interior pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub luminance: f64,
    pub saturated: bool,
}

/// Result of scanning one frame against its face mask.
#[derive(Clone, Debug)]
pub struct LuminanceScan {
    samples: Vec<PixelSample>,
    width: u32,
    height: u32,
    total_illuminance: f64,
    max_face_illuminance: f64,
    max_background_illuminance: f64,
    background_saturation_count: usize,
}

impl LuminanceScan {
    pub fn samples(&self) -> &[PixelSample] {
        &self.samples
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn face_pixel_count(&self) -> usize {
        self.samples.len()
    }

    pub fn background_pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize) - self.samples.len()
    }

    pub fn background_saturation_count(&self) -> usize {
        self.background_saturation_count
    }

    pub fn average_illuminance(&self) -> f64 {
        self.total_illuminance / ((self.width as usize) * (self.height as usize)) as f64
    }

    pub fn max_face_illuminance(&self) -> f64 {
        self.max_face_illuminance
    }

    pub fn max_background_illuminance(&self) -> f64 {
        self.max_background_illuminance
    }

    /// Adaptive shadow threshold for this cycle.
    ///
    /// A well-lit scene anchors on the face's own brightest point, so only
    /// pixels darker than the face's best count as shadow. A dim scene
    /// anchors on the brightest background point, with a fixed floor when
    /// the background itself is dark, so an evenly dim face is not
    /// flagged wholesale.
    pub fn shadow_threshold(&self) -> f64 {
        if self.average_illuminance() > WELL_LIT_AVERAGE_ILLUMINANCE {
            self.max_face_illuminance
        } else if self.max_background_illuminance < SHADOW_THRESHOLD_FLOOR {
            SHADOW_THRESHOLD_FLOOR
        } else {
            self.max_background_illuminance
        }
    }
}

pub struct LuminanceClassifier;

impl LuminanceClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Scans the frame once and classifies every pixel against the mask.
    ///
    /// Synchronous and non-suspending: the whole scan observes a single
    /// consistent frame snapshot.
    pub fn classify(&self, frame: &Frame, mask: &FaceMask) -> LuminanceScan {
        debug_assert_eq!(
            (frame.width(), frame.height()),
            (mask.width(), mask.height()),
            "frame and mask dimensions must match"
        );

        let pixels = frame.as_ndarray();
        let width = frame.width();
        let height = frame.height();

        let mut samples = Vec::new();
        let mut total_illuminance = 0.0;
        let mut max_face_illuminance = 0.0_f64;
        let mut max_background_illuminance = 0.0_f64;
        let mut background_saturation_count = 0;

        for y in 0..height {
            for x in 0..width {
                let (yi, xi) = (y as usize, x as usize);
                let r = pixels[[yi, xi, 0]] as f64 / 255.0;
                let g = pixels[[yi, xi, 1]] as f64 / 255.0;
                let b = pixels[[yi, xi, 2]] as f64 / 255.0;

                let luminance =
                    LUMA_WEIGHT_RED * r + LUMA_WEIGHT_GREEN * g + LUMA_WEIGHT_BLUE * b;
                // Channel-product overexposure proxy, not true saturation:
                // near-maximal only when every channel is near-maximal.
                let color_median = r * g * b / 3.0;
                let saturated =
                    color_median > MEDIAN_SATURATION_LIMIT || r > RED_SATURATION_LIMIT;

                total_illuminance += luminance;

                if mask.is_face(x, y) {
                    if max_face_illuminance < color_median {
                        max_face_illuminance = color_median;
                    }
                    samples.push(PixelSample {
                        x,
                        y,
                        luminance,
                        saturated,
                    });
                } else {
                    if max_background_illuminance < color_median {
                        max_background_illuminance = color_median;
                    }
                    if saturated {
                        background_saturation_count += 1;
                    }
                }
            }
        }

        LuminanceScan {
            samples,
            width,
            height,
            total_illuminance,
            max_face_illuminance,
            max_background_illuminance,
            background_saturation_count,
        }
    }
}

impl Default for LuminanceClassifier {
    fn default() -> Self {
        Self::new()
    }
}
