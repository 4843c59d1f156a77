//! Error taxonomy.
//!
//! An empty frame with no qualifying quadrilateral is *not* an error — the
//! pipeline reports it as `Ok(None)` and the caller keeps scanning. The types
//! here cover the two genuine failures: a payload that cannot be decoded into
//! a bitmap, and degenerate corner geometry discovered after a candidate was
//! found. Both are terminal for a single invocation; the periodic sampler is
//! the retry mechanism.
use thiserror::Error;

/// The input payload could not be turned into a bitmap.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 frame payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode frame bitmap: {0}")]
    Image(#[from] image::ImageError),
}

/// A candidate was found but its geometry cannot be rectified.
#[derive(Debug, Error)]
pub enum RectifyError {
    #[error("estimated output size {width:.1}x{height:.1} is below one pixel")]
    DegenerateDimensions { width: f32, height: f32 },
    #[error("corner geometry is collinear; projective solve failed")]
    CollinearCorners,
}

/// Union of the failures a payload-driven invocation can surface.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Rectify(#[from] RectifyError),
}
