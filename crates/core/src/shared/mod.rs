pub mod constants;
pub mod frame;
pub mod overlay_image;
