//! Parameter types configuring the detector stages.
//!
//! Defaults reproduce the behaviour the pipeline was tuned for: a 500-pixel
//! working height and a contour search with automatic thresholding. For
//! tuning, start with the Canny thresholds and the area floor.

use crate::search::SearchParams;
use serde::Deserialize;

/// Detector-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Height of the working image used for detection; width scales
    /// proportionally. Rectification always samples the original frame.
    pub working_height: u32,
    /// Evaluate the three channel planes on a rayon pool. Purely a
    /// performance knob: the winner is selected in plane index order either
    /// way.
    pub parallel_channels: bool,
    /// Per-channel contour search knobs.
    pub search: SearchParams,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            working_height: 500,
            parallel_channels: true,
            search: SearchParams::default(),
        }
    }
}
