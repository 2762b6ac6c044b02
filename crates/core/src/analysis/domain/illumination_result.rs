use crate::analysis::domain::luminance_classifier::LuminanceScan;
use crate::analysis::domain::mask_generator::OverlayMasks;
use crate::shared::overlay_image::OverlayImage;

/// The only value the analysis core exposes per cycle.
///
/// Immutable once produced; each cycle's result supersedes the previous
/// one wholesale. Ratios are fractions in [0,1]. Absent entirely (the
/// constructor returns `None`) when the cycle found no face pixels, so
/// callers never see a 0/0 ratio.
#[derive(Clone, Debug)]
pub struct IlluminationResult {
    pub shadow_ratio: f64,
    pub saturation_ratio: f64,
    pub background_saturation_ratio: f64,
    pub shadow_mask: OverlayImage,
    pub saturation_mask: OverlayImage,
    pub frame_index: usize,
}

impl IlluminationResult {
    pub fn from_cycle(
        scan: &LuminanceScan,
        masks: OverlayMasks,
        frame_index: usize,
    ) -> Option<Self> {
        let face_pixels = scan.face_pixel_count();
        if face_pixels == 0 {
            return None;
        }

        let background_pixels = scan.background_pixel_count();
        let background_saturation_ratio = if background_pixels == 0 {
            0.0
        } else {
            scan.background_saturation_count() as f64 / background_pixels as f64
        };

        Some(Self {
            shadow_ratio: masks.shadow_pixel_count as f64 / face_pixels as f64,
            saturation_ratio: masks.saturation_pixel_count as f64 / face_pixels as f64,
            background_saturation_ratio,
            shadow_mask: masks.shadow_mask,
            saturation_mask: masks.saturation_mask,
            frame_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    use crate::analysis::domain::luminance_classifier::LuminanceClassifier;
    use crate::analysis::domain::mask_generator::MaskGenerator;
    use crate::masking::domain::face_mask::{FaceMask, FACE_VALUE};
    use crate::shared::frame::Frame;

    fn uniform_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height, 3, 9)
    }

    fn rect_face_mask(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> FaceMask {
        let mut grid = Array2::zeros((height as usize, width as usize));
        for y in y0..y1 {
            for x in x0..x1 {
                grid[[y as usize, x as usize]] = FACE_VALUE;
            }
        }
        FaceMask::from_grid(grid)
    }

    fn analyze(frame: &Frame, mask: &FaceMask) -> Option<IlluminationResult> {
        let scan = LuminanceClassifier::new().classify(frame, mask);
        let masks = MaskGenerator::new().generate(&scan);
        IlluminationResult::from_cycle(&scan, masks, frame.index())
    }

    #[test]
    fn test_fully_shadowed_face_has_ratio_one() {
        let frame = uniform_frame(20, 20, [30, 30, 30]);
        let mask = rect_face_mask(20, 20, 5, 5, 15, 15);
        let result = analyze(&frame, &mask).unwrap();

        assert_relative_eq!(result.shadow_ratio, 1.0);
        assert_relative_eq!(result.saturation_ratio, 0.0);
        assert_relative_eq!(result.background_saturation_ratio, 0.0);
        assert_eq!(result.frame_index, 9);
    }

    #[test]
    fn test_white_face_has_saturation_ratio_one() {
        let frame = uniform_frame(10, 10, [255, 255, 255]);
        let mask = rect_face_mask(10, 10, 2, 2, 8, 8);
        let result = analyze(&frame, &mask).unwrap();

        assert_relative_eq!(result.saturation_ratio, 1.0);
        // Background is white too: every background pixel is saturated.
        assert_relative_eq!(result.background_saturation_ratio, 1.0);
    }

    #[test]
    fn test_ratios_stay_within_unit_interval() {
        let mut data = vec![0u8; 16 * 16 * 3];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = ((i * 53) % 256) as u8;
        }
        let frame = Frame::new(data, 16, 16, 3, 0);
        let mask = rect_face_mask(16, 16, 4, 4, 12, 12);
        let result = analyze(&frame, &mask).unwrap();

        for ratio in [
            result.shadow_ratio,
            result.saturation_ratio,
            result.background_saturation_ratio,
        ] {
            assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} out of range");
        }
    }

    #[test]
    fn test_no_face_pixels_produces_no_result() {
        let frame = uniform_frame(8, 8, [128, 128, 128]);
        let mask = FaceMask::from_grid(Array2::zeros((8, 8)));
        assert!(analyze(&frame, &mask).is_none());
    }

    #[test]
    fn test_face_covering_whole_frame_has_zero_background_ratio() {
        let frame = uniform_frame(8, 8, [255, 255, 255]);
        let mask = rect_face_mask(8, 8, 0, 0, 8, 8);
        let result = analyze(&frame, &mask).unwrap();

        // No background pixels at all: the ratio degrades to zero instead
        // of dividing by zero.
        assert_relative_eq!(result.background_saturation_ratio, 0.0);
        assert_relative_eq!(result.saturation_ratio, 1.0);
    }

    #[test]
    fn test_shadow_ratio_never_rises_with_face_brightness() {
        // With the threshold anchored on the fixed floor (dim scene, dark
        // background), brightening every face pixel can only move pixels
        // out of shadow, never into it.
        let mask = rect_face_mask(20, 20, 5, 5, 15, 15);
        let ratios: Vec<f64> = [30u8, 60, 90]
            .into_iter()
            .map(|level| {
                let frame = uniform_frame(20, 20, [level, level, level]);
                analyze(&frame, &mask).unwrap().shadow_ratio
            })
            .collect();

        assert!(ratios[0] >= ratios[1]);
        assert!(ratios[1] >= ratios[2]);
        // Luminance 90/255 clears the 0.3 floor; the dimmer levels do not.
        assert_relative_eq!(ratios[0], 1.0);
        assert_relative_eq!(ratios[2], 0.0);
    }

    #[test]
    fn test_masks_travel_with_the_result() {
        let frame = uniform_frame(20, 20, [30, 30, 30]);
        let mask = rect_face_mask(20, 20, 5, 5, 15, 15);
        let result = analyze(&frame, &mask).unwrap();

        assert!(!result.shadow_mask.is_blank());
        assert!(result.saturation_mask.is_blank());
        assert_eq!(result.shadow_mask.width(), 20);
        assert_eq!(result.shadow_mask.height(), 20);
    }
}
