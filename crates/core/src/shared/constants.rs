/// Perceptual luma weights (ITU-R BT.601).
pub const LUMA_WEIGHT_RED: f64 = 0.299;
pub const LUMA_WEIGHT_GREEN: f64 = 0.587;
pub const LUMA_WEIGHT_BLUE: f64 = 0.114;

/// A pixel whose color-median value exceeds this is overexposed (225/255).
pub const MEDIAN_SATURATION_LIMIT: f64 = 225.0 / 255.0;

/// A pixel whose red channel exceeds this is overexposed (250/255).
pub const RED_SATURATION_LIMIT: f64 = 250.0 / 255.0;

/// Average frame illuminance above which the scene counts as well lit;
/// the shadow threshold then anchors on the face's own brightest pixel.
pub const WELL_LIT_AVERAGE_ILLUMINANCE: f64 = 0.4;

/// Fixed shadow threshold floor used when the background is too dark
/// to anchor the threshold itself.
pub const SHADOW_THRESHOLD_FLOOR: f64 = 0.3;

/// Overlay paint for shadowed face pixels (RGBA).
pub const SHADOW_OVERLAY_COLOR: [u8; 4] = [86, 29, 247, 255];

/// Overlay paint for saturated face pixels (RGBA).
pub const SATURATION_OVERLAY_COLOR: [u8; 4] = [255, 182, 171, 255];
