use crate::quad::OrderedQuad;
use image::RgbImage;

/// Outcome of a successful detection: the document corners in original-frame
/// pixel coordinates plus the rectified rendering of the document region.
#[derive(Clone, Debug)]
pub struct Scan {
    pub corners: OrderedQuad,
    pub rectified: RgbImage,
    pub latency_ms: f64,
}

impl Scan {
    /// Width of the rectified output in pixels.
    pub fn width(&self) -> u32 {
        self.rectified.width()
    }

    /// Height of the rectified output in pixels.
    pub fn height(&self) -> u32 {
        self.rectified.height()
    }
}
