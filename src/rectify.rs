//! Perspective rectification: warp the document region of the full-resolution
//! frame into an axis-aligned rectangle.
//!
//! The destination rectangle is `(0,0) (W−1,0) (W−1,H−1) (0,H−1)` with `W`/`H`
//! estimated from the longer of each opposing edge pair. Source corners are
//! supplied in the same TL,TR,BR,BL winding as the destination; the warp
//! samples the source through the inverse transform with bilinear filtering
//! and fills out-of-bounds samples with black, so content never bleeds in by
//! extrapolation.
//!
//! Rectification always reads the original-resolution frame, never the
//! working-resolution copy used for detection.
use crate::error::RectifyError;
use crate::homography::{solve_projective, to_row_major};
use crate::quad::OrderedQuad;
use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use log::debug;

/// Warps `frame` so the quadrilateral `corners` fills the output rectangle.
pub fn rectify(frame: &RgbImage, corners: &OrderedQuad) -> Result<RgbImage, RectifyError> {
    let (width, height) = corners.target_dimensions();
    if !(width >= 1.0) || !(height >= 1.0) {
        return Err(RectifyError::DegenerateDimensions { width, height });
    }
    let out_w = width.round() as u32;
    let out_h = height.round() as u32;

    let src = corners.winding();
    let dst = [
        [0.0, 0.0],
        [width - 1.0, 0.0],
        [width - 1.0, height - 1.0],
        [0.0, height - 1.0],
    ];
    let hmtx = solve_projective(&src, &dst).ok_or(RectifyError::CollinearCorners)?;
    let projection =
        Projection::from_matrix(to_row_major(&hmtx)).ok_or(RectifyError::CollinearCorners)?;

    debug!("rectify: output {}x{}", out_w, out_h);
    let mut out = RgbImage::new(out_w, out_h);
    warp_into(
        frame,
        &projection,
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
        &mut out,
    );
    Ok(out)
}
