/// An offscreen RGBA raster aligned 1:1 with the source frame.
///
/// Starts fully transparent; the mask generator paints individual pixels
/// into it. Convertible to an `image::RgbaImage` for rendering or export.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl OverlayImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn paint(&mut self, x: u32, y: u32, color: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height, "paint out of bounds");
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[offset..offset + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    /// True when no pixel has been painted.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("overlay buffer length must match dimensions")
    }
}
