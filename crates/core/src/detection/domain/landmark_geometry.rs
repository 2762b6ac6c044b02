//! Facial landmark polygons in frame pixel coordinates.
//!
//! One geometry is produced per analysis cycle by the external landmark
//! detector and discarded at cycle end. The silhouette outlines the face;
//! the remaining polygons are interior features carved out of the mask,
//! since skin illumination rather than feature color is the signal of
//! interest.

/// A 2-D point in frame pixel coordinates.
pub type Point = (f64, f64);

/// Minimum points for a polygon to enclose any area.
pub const MIN_POLYGON_POINTS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkGeometry {
    pub silhouette: Vec<Point>,
    pub lips_outer: Vec<Point>,
    pub lips_inner: Vec<Point>,
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub left_eyebrow: Vec<Point>,
    pub right_eyebrow: Vec<Point>,
    pub nose: Vec<Point>,
}

impl LandmarkGeometry {
    /// Interior feature polygons, in carve-out order.
    pub fn features(&self) -> impl Iterator<Item = &[Point]> {
        [
            self.lips_outer.as_slice(),
            self.lips_inner.as_slice(),
            self.left_eye.as_slice(),
            self.right_eye.as_slice(),
            self.left_eyebrow.as_slice(),
            self.right_eyebrow.as_slice(),
            self.nose.as_slice(),
        ]
        .into_iter()
    }
}
