//! Narrow capability interface over the raster vision primitives.
//!
//! The contour search depends on this trait rather than on a concrete image
//! processing backend, so unit tests can drive it with a scripted double that
//! returns synthetic contours. [`ImageprocOps`] is the production
//! implementation, delegating one method per primitive to `imageproc`.
//!
//! Pure-geometry primitives (convexity, area, perimeter) live in
//! [`crate::quad`] as free functions: they are deterministic math with no
//! raster backend to substitute.
use crate::quad::Point;
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometry::approximate_polygon_dp;
use imageproc::morphology::close;
use imageproc::point::Point as PixelPoint;

/// Raster primitives consumed by the per-channel candidate search.
pub trait VisionOps {
    /// Gaussian smoothing to suppress sensor/compression noise.
    fn blur(&self, plane: &GrayImage, sigma: f32) -> GrayImage;

    /// Foreground/background separation with an automatically chosen global
    /// threshold (no hand-tuned constant).
    fn binarize(&self, plane: &GrayImage) -> GrayImage;

    /// Edge detection on the binarized plane.
    fn detect_edges(&self, plane: &GrayImage, low: f32, high: f32) -> GrayImage;

    /// Morphological closing with a square structuring element of the given
    /// radius, bridging small gaps so the outline forms one closed contour.
    fn close_gaps(&self, edges: &GrayImage, radius: u8) -> GrayImage;

    /// Every contour in the edge map, nested or not — no hierarchy.
    fn extract_contours(&self, edges: &GrayImage) -> Vec<Vec<Point>>;

    /// Douglas-Peucker approximation of a closed contour with the given
    /// absolute tolerance.
    fn approx_polygon(&self, contour: &[Point], epsilon: f64) -> Vec<Point>;
}

/// Production implementation backed by `imageproc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageprocOps;

impl VisionOps for ImageprocOps {
    fn blur(&self, plane: &GrayImage, sigma: f32) -> GrayImage {
        gaussian_blur_f32(plane, sigma)
    }

    fn binarize(&self, plane: &GrayImage) -> GrayImage {
        let level = otsu_level(plane);
        threshold(plane, level, ThresholdType::Binary)
    }

    fn detect_edges(&self, plane: &GrayImage, low: f32, high: f32) -> GrayImage {
        canny(plane, low, high)
    }

    fn close_gaps(&self, edges: &GrayImage, radius: u8) -> GrayImage {
        close(edges, Norm::LInf, radius)
    }

    fn extract_contours(&self, edges: &GrayImage) -> Vec<Vec<Point>> {
        find_contours::<i32>(edges)
            .into_iter()
            .map(|c| {
                c.points
                    .into_iter()
                    .map(|p| [p.x as f32, p.y as f32])
                    .collect()
            })
            .collect()
    }

    fn approx_polygon(&self, contour: &[Point], epsilon: f64) -> Vec<Point> {
        // Contour coordinates come from pixel tracing, so rounding to the
        // integer grid loses nothing.
        let pts: Vec<PixelPoint<i32>> = contour
            .iter()
            .map(|p| PixelPoint::new(p[0].round() as i32, p[1].round() as i32))
            .collect();
        let mut poly: Vec<Point> = approximate_polygon_dp(&pts, epsilon, true)
            .into_iter()
            .map(|p| [p.x as f32, p.y as f32])
            .collect();
        // Return a plain vertex list: no consecutive repeats, no closure
        // duplicate of the first vertex at the end.
        poly.dedup();
        if poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        poly
    }
}
