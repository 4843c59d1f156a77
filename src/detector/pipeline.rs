//! Detector pipeline driving document boundary detection end-to-end.
//!
//! The [`DocumentDetector`] exposes a simple API: feed an RGB frame and get
//! the document corners plus the rectified rendering, with detailed
//! diagnostics on request. Internally it coordinates the working-resolution
//! resize, the per-channel candidate search, cross-channel selection, corner
//! ordering and the projective warp.
//!
//! Typical usage:
//! ```no_run
//! use doc_detector::{DetectorParams, DocumentDetector};
//!
//! # fn example(frame: image::RgbImage) {
//! let detector = DocumentDetector::new(DetectorParams::default());
//! match detector.process(&frame) {
//!     Ok(Some(scan)) => println!("document at {:?}", scan.corners),
//!     Ok(None) => println!("keep scanning"),
//!     Err(err) => eprintln!("rectification failed: {err}"),
//! }
//! # }
//! ```
use super::params::DetectorParams;
use crate::channels::{decompose, PLANE_NAMES};
use crate::diagnostics::{
    ChannelReport, InputDescriptor, OutputDescriptor, PipelineTrace, TimingBreakdown,
    WorkingDescriptor,
};
use crate::error::{RectifyError, ScanError};
use crate::image::io::decode_rgb_payload;
use crate::ops::ImageprocOps;
use crate::rectify::rectify;
use crate::search::{pick_best, search_channels};
use crate::types::Scan;
use image::RgbImage;
use log::debug;
use std::time::Instant;

/// Document detector orchestrating channel decomposition, candidate search
/// and perspective rectification.
///
/// The detector is stateless across invocations: every entity created during
/// one `process` call is dropped when the call returns. It is therefore safe
/// to share behind `&self` and to call from a sampler worker thread.
pub struct DocumentDetector {
    params: DetectorParams,
    ops: ImageprocOps,
}

impl DocumentDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: DetectorParams) -> Self {
        Self {
            params,
            ops: ImageprocOps,
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Replace the detector parameters.
    pub fn set_params(&mut self, params: DetectorParams) {
        self.params = params;
    }

    /// Run the detector on one frame.
    ///
    /// `Ok(None)` means no qualifying quadrilateral exists in any channel —
    /// a normal outcome while scanning. `Err` is reserved for degenerate
    /// corner geometry discovered after a candidate was found.
    pub fn process(&self, frame: &RgbImage) -> Result<Option<Scan>, RectifyError> {
        self.process_with_diagnostics(frame).0
    }

    /// Decode an encoded frame payload (raw base64 or a `data:` URL) and run
    /// the detector on it.
    pub fn process_payload(&self, payload: &str) -> Result<Option<Scan>, ScanError> {
        let frame = decode_rgb_payload(payload)?;
        Ok(self.process(&frame)?)
    }

    /// Run the detector and return both the outcome and a detailed trace.
    pub fn process_with_diagnostics(
        &self,
        frame: &RgbImage,
    ) -> (Result<Option<Scan>, RectifyError>, PipelineTrace) {
        let (width, height) = frame.dimensions();
        debug!(
            "DocumentDetector::process start w={} h={} working_height={}",
            width, height, self.params.working_height
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let resize_start = Instant::now();
        let working = decompose(frame, self.params.working_height);
        timings.push("decompose", elapsed_ms(resize_start));

        if working.width == 0 || working.height == 0 {
            debug!("DocumentDetector::process empty frame");
            timings.total_ms = elapsed_ms(total_start);
            let trace = PipelineTrace {
                input: InputDescriptor { width, height },
                working: None,
                channels: Vec::new(),
                winner: None,
                corners: None,
                output: None,
                timings,
            };
            return (Ok(None), trace);
        }

        let search_start = Instant::now();
        let candidates = search_channels(
            &self.ops,
            &working.planes,
            &self.params.search,
            self.params.parallel_channels,
        );
        timings.push("channel_search", elapsed_ms(search_start));

        let channels = candidates
            .iter()
            .enumerate()
            .map(|(idx, c)| ChannelReport {
                channel: idx,
                name: PLANE_NAMES[idx],
                found: c.is_some(),
                area: c.map(|c| c.area),
            })
            .collect();

        let mut trace = PipelineTrace {
            input: InputDescriptor { width, height },
            working: Some(WorkingDescriptor {
                width: working.width,
                height: working.height,
                scale: working.scale,
            }),
            channels,
            winner: None,
            corners: None,
            output: None,
            timings,
        };

        let Some((winner, best)) = pick_best(&candidates) else {
            debug!("DocumentDetector::process no candidate in any channel");
            trace.timings.total_ms = elapsed_ms(total_start);
            return (Ok(None), trace);
        };
        trace.winner = Some(winner);

        // Back to original-frame coordinates, then canonical corner order.
        let corners = best.quad.scaled(1.0 / working.scale).ordered();
        trace.corners = Some(corners);

        let rectify_start = Instant::now();
        let rectified = match rectify(frame, &corners) {
            Ok(rectified) => rectified,
            Err(err) => {
                debug!("DocumentDetector::process rectification failed: {err}");
                trace.timings.push("rectify", elapsed_ms(rectify_start));
                trace.timings.total_ms = elapsed_ms(total_start);
                return (Err(err), trace);
            }
        };
        trace.timings.push("rectify", elapsed_ms(rectify_start));
        trace.output = Some(OutputDescriptor {
            width: rectified.width(),
            height: rectified.height(),
        });

        let latency = elapsed_ms(total_start);
        trace.timings.total_ms = latency;
        debug!(
            "DocumentDetector::process done channel={} output={}x{} latency_ms={:.3}",
            winner,
            rectified.width(),
            rectified.height(),
            latency
        );

        (
            Ok(Some(Scan {
                corners,
                rectified,
                latency_ms: latency,
            })),
            trace,
        )
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
