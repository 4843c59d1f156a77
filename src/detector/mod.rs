//! Document detector orchestrating the boundary-detection pipeline.
//!
//! Overview
//! - Downscales the frame to a fixed working height and splits it into
//!   perceptual (L\*u\*v\*) channel planes.
//! - Searches each plane independently for the largest convex quadrilateral
//!   and keeps the globally best candidate by enclosed area.
//! - Rescales the winner into original-frame coordinates, canonicalizes the
//!   corner order, estimates the output rectangle from opposing edge lengths
//!   and warps the full-resolution frame through the solved projective
//!   transform.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the demo CLI.
//! - `pipeline` – the main [`DocumentDetector`] implementation.
//!
//! An absent document is a normal outcome (`Ok(None)`), not an error; only
//! undecodable payloads and degenerate corner geometry surface as errors.

pub mod params;
mod pipeline;

pub use params::DetectorParams;
pub use pipeline::DocumentDetector;
