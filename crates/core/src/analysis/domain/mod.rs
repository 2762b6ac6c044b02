pub mod illumination_result;
pub mod luminance_classifier;
pub mod mask_generator;
