//! Projective-transform helpers: the 4-point solve used by rectification and
//! point mapping for verification.
//!
//! The solve is a direct linear transform with `h33` pinned to 1: each
//! correspondence contributes two rows of an 8×8 linear system, solved by LU
//! decomposition. Collinear source points make the system singular and the
//! solve reports `None` rather than producing a garbage mapping.
use crate::quad::Point;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f32 = 1e-9;

/// Solves the projective transform mapping `src[i]` onto `dst[i]`.
///
/// Source and destination must list their vertices in the same winding around
/// the quadrilateral, or the resulting mapping is mirrored.
pub fn solve_projective(src: &[Point; 4], dst: &[Point; 4]) -> Option<Matrix3<f32>> {
    let mut a = SMatrix::<f32, 8, 8>::zeros();
    let mut b = SVector::<f32, 8>::zeros();
    for (i, (&[x, y], &[u, v])) in src.iter().zip(dst.iter()).enumerate() {
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;
        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }
    let h = a.lu().solve(&b)?;
    if h.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Matrix3::new(
        h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0,
    ))
}

/// Maps points through a homography, or `None` if any point lands at infinity.
pub fn apply_homography_points(h: &Matrix3<f32>, pts: &[Point]) -> Option<Vec<Point>> {
    let mut out = Vec::with_capacity(pts.len());
    for &p in pts {
        let v = h * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        out.push([v[0] / w, v[1] / w]);
    }
    Some(out)
}

/// Row-major coefficient array, the layout the warp backend expects.
pub fn to_row_major(h: &Matrix3<f32>) -> [f32; 9] {
    [
        h[(0, 0)],
        h[(0, 1)],
        h[(0, 2)],
        h[(1, 0)],
        h[(1, 1)],
        h[(1, 2)],
        h[(2, 0)],
        h[(2, 1)],
        h[(2, 2)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_correspondence_yields_identity() {
        let pts = [[0.0, 0.0], [100.0, 0.0], [100.0, 80.0], [0.0, 80.0]];
        let h = solve_projective(&pts, &pts).expect("solvable");
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (h[(i, j)] - expected).abs() < 1e-4,
                    "h[({i},{j})]={}",
                    h[(i, j)]
                );
            }
        }
    }

    #[test]
    fn solved_transform_maps_corners_exactly() {
        let src = [[12.0, 8.0], [205.0, 11.0], [198.0, 152.0], [6.0, 149.0]];
        let dst = [[0.0, 0.0], [199.0, 0.0], [199.0, 143.0], [0.0, 143.0]];
        let h = solve_projective(&src, &dst).expect("solvable");
        let mapped = apply_homography_points(&h, &src).expect("finite");
        for (m, d) in mapped.iter().zip(dst.iter()) {
            assert!((m[0] - d[0]).abs() < 1e-2, "{m:?} vs {d:?}");
            assert!((m[1] - d[1]).abs() < 1e-2, "{m:?} vs {d:?}");
        }
    }

    #[test]
    fn collinear_source_points_fail() {
        let src = [[0.0, 0.0], [10.0, 10.0], [20.0, 20.0], [30.0, 30.0]];
        let dst = [[0.0, 0.0], [100.0, 0.0], [100.0, 80.0], [0.0, 80.0]];
        assert!(solve_projective(&src, &dst).is_none());
    }
}
