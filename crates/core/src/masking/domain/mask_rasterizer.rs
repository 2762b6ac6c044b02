use ndarray::Array2;

use crate::detection::domain::landmark_geometry::{LandmarkGeometry, Point, MIN_POLYGON_POINTS};
use crate::masking::domain::face_mask::{FaceMask, BACKGROUND_VALUE, FACE_VALUE};

/// Rasterizes landmark polygons into a binary [`FaceMask`].
///
/// The silhouette is filled as face, then each interior feature polygon
/// (lips, eyes, eyebrows, nose) is carved back out to background.
/// Unrasterizable feature polygons (too few points, or a non-finite
/// coordinate from partial detector output) are skipped for the cycle;
/// an unrasterizable silhouette means no face region exists at all.
pub struct MaskRasterizer {
    width: u32,
    height: u32,
}

impl MaskRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn rasterize(&self, geometry: &LandmarkGeometry) -> Option<FaceMask> {
        if !is_rasterizable(&geometry.silhouette) {
            return None;
        }

        let mut grid = Array2::from_elem(
            (self.height as usize, self.width as usize),
            BACKGROUND_VALUE,
        );
        fill_polygon(&mut grid, &geometry.silhouette, FACE_VALUE);

        for feature in geometry.features() {
            if is_rasterizable(feature) {
                fill_polygon(&mut grid, feature, BACKGROUND_VALUE);
            }
        }

        Some(FaceMask::from_grid(grid))
    }
}

fn is_rasterizable(points: &[Point]) -> bool {
    points.len() >= MIN_POLYGON_POINTS
        && points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
}

/// Even-odd scanline fill sampled at pixel centers.
///
/// Edges run between consecutive points with an implicit closing edge from
/// last back to first, so pre-closed and open point lists fill identically.
/// Spans are clamped to the raster extent.
fn fill_polygon(grid: &mut Array2<u8>, points: &[Point], value: u8) {
    let width = grid.ncols();
    let height = grid.nrows();
    let n = points.len();

    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let y_first = (min_y - 0.5).ceil().max(0.0);
    let y_last = (max_y - 0.5).floor().min(height as f64 - 1.0);
    if y_first > y_last {
        return;
    }

    let mut crossings: Vec<f64> = Vec::new();
    for y in y_first as usize..=y_last as usize {
        let sy = y as f64 + 0.5;

        crossings.clear();
        for i in 0..n {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            // Half-open span rule: each vertex counts for exactly one of
            // its two edges, so crossings always pair up.
            if (y0 <= sy && y1 > sy) || (y1 <= sy && y0 > sy) {
                crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let x_first = (span[0] - 0.5).ceil().max(0.0);
            let x_last = (span[1] - 0.5).floor().min(width as f64 - 1.0);
            if x_first > x_last {
                continue;
            }
            for x in x_first as usize..=x_last as usize {
                grid[[y, x]] = value;
            }
        }
    }
}
