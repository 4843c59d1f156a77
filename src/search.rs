//! Candidate search: the best convex quadrilateral per channel plane, and the
//! cross-channel selection of the global winner.
//!
//! Per plane the search runs blur → automatic binarization → edge detection →
//! morphological closing → contour extraction, then approximates each contour
//! with a tolerance proportional to its perimeter (so the test is
//! scale-invariant within the plane) and keeps convex 4-vertex polygons above
//! an absolute area floor. The largest qualifying polygon wins; comparison is
//! strict `>`, so the first-found candidate survives ties.
//!
//! Planes are independent: the cross-channel pass may evaluate them on a
//! rayon pool with no effect on the result, and the winner is chosen in plane
//! index order for a deterministic tie-break.
use crate::ops::VisionOps;
use crate::quad::{arc_length, is_convex_quad, polygon_area, Quad};
use image::GrayImage;
use log::debug;
use rayon::prelude::*;
use serde::Deserialize;

/// Knobs for the per-channel candidate search.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Gaussian sigma applied before binarization.
    pub blur_sigma: f32,
    /// Canny hysteresis thresholds.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Radius of the square closing element (2 ⇒ 5×5).
    pub close_radius: u8,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub approx_tol_frac: f64,
    /// Minimum candidate area in working-resolution units; anything smaller
    /// is treated as noise.
    pub min_area: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 200.0,
            close_radius: 2,
            approx_tol_frac: 0.02,
            min_area: 1000.0,
        }
    }
}

/// A qualifying quadrilateral and its enclosed area at working resolution.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub quad: Quad,
    pub area: f32,
}

/// Finds the best convex quadrilateral in one channel plane.
///
/// Returns the winning polygon's vertices in trace order, or `None` if no
/// contour qualifies. All intermediate buffers are scoped to the call.
pub fn find_in_channel<P: VisionOps>(
    ops: &P,
    plane: &GrayImage,
    params: &SearchParams,
) -> Option<Candidate> {
    let smoothed = ops.blur(plane, params.blur_sigma);
    let binary = ops.binarize(&smoothed);
    let edges = ops.detect_edges(&binary, params.canny_low, params.canny_high);
    let closed = ops.close_gaps(&edges, params.close_radius);

    let mut best: Option<Candidate> = None;
    for contour in ops.extract_contours(&closed) {
        if contour.len() < 4 {
            continue;
        }
        let epsilon = params.approx_tol_frac * arc_length(&contour);
        let poly = ops.approx_polygon(&contour, epsilon);
        if poly.len() != 4 {
            continue;
        }
        let vertices = [poly[0], poly[1], poly[2], poly[3]];
        if !is_convex_quad(&vertices) {
            continue;
        }
        let area = polygon_area(&poly);
        if area <= params.min_area {
            continue;
        }
        if best.map_or(true, |b| area > b.area) {
            best = Some(Candidate {
                quad: Quad(vertices),
                area,
            });
        }
    }
    best
}

/// Runs [`find_in_channel`] over every plane, optionally in parallel.
///
/// The result vector is index-aligned with `planes` regardless of execution
/// order, so the downstream winner selection stays deterministic.
pub fn search_channels<P: VisionOps + Sync>(
    ops: &P,
    planes: &[GrayImage],
    params: &SearchParams,
    parallel: bool,
) -> Vec<Option<Candidate>> {
    if parallel {
        planes
            .par_iter()
            .map(|plane| find_in_channel(ops, plane, params))
            .collect()
    } else {
        planes
            .iter()
            .map(|plane| find_in_channel(ops, plane, params))
            .collect()
    }
}

/// Picks the largest-area candidate across channels. Strict `>` keeps the
/// lowest-index channel on ties.
pub fn pick_best(candidates: &[Option<Candidate>]) -> Option<(usize, Candidate)> {
    let mut best: Option<(usize, Candidate)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let Some(c) = candidate else { continue };
        if best.map_or(true, |(_, b)| c.area > b.area) {
            best = Some((idx, *c));
        }
    }
    if let Some((idx, c)) = best {
        debug!("pick_best: channel={} area={:.1}", idx, c.area);
    }
    best
}
