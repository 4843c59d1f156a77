#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod quad;
pub mod sampler;
pub mod types;

// Building blocks – still public, but considered unstable internals.
pub mod channels;
pub mod config;
pub mod homography;
pub mod ops;
pub mod rectify;
pub mod search;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorParams, DocumentDetector};
pub use crate::types::Scan;

// Error taxonomy.
pub use crate::error::{DecodeError, RectifyError, ScanError};

// Geometry types appearing in the public API.
pub use crate::quad::{OrderedQuad, Point, Quad};

// Live-feed sampling.
pub use crate::sampler::{FrameSampler, ResultSlot, SamplerParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use doc_detector::prelude::*;
///
/// # fn main() {
/// let frame = image::RgbImage::new(640, 480);
/// let detector = DocumentDetector::new(DetectorParams::default());
/// match detector.process(&frame) {
///     Ok(Some(scan)) => println!("rectified {}x{}", scan.width(), scan.height()),
///     Ok(None) => println!("no document"),
///     Err(err) => eprintln!("{err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::detector::{DetectorParams, DocumentDetector};
    pub use crate::sampler::{FrameSampler, SamplerParams};
    pub use crate::types::Scan;
}
