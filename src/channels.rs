//! Working-resolution resize and perceptual channel decomposition.
//!
//! Purpose
//! - Shrink the frame to a fixed working height so the contour search runs at
//!   a predictable cost regardless of camera resolution.
//! - Convert to CIE L\*u\*v\* and split into three planes. A document edge
//!   that is washed out in luminance is often still crisp in one of the
//!   chrominance planes, so each plane is searched independently.
//!
//! Design
//! - The resize preserves aspect ratio; `scale = working_height / height` is
//!   recorded so candidates can be mapped back with `1 / scale`.
//! - Each L\*u\*v\* component is rescaled onto the full 8-bit range using the
//!   conventional spans (L ∈ [0, 100], u ∈ [−134, 220], v ∈ [−140, 122]), so
//!   downstream thresholding sees comparable dynamic range in every plane.
use image::imageops::{resize, FilterType};
use image::{GrayImage, RgbImage};
use palette::{FromColor, Luv, Srgb};

/// Names for the three planes, indexed like [`WorkingImage::planes`].
pub const PLANE_NAMES: [&str; 3] = ["l", "u", "v"];

/// The downscaled frame, decomposed into three single-channel planes.
#[derive(Clone, Debug)]
pub struct WorkingImage {
    pub planes: [GrayImage; 3],
    pub width: u32,
    pub height: u32,
    /// Ratio working height / original height; applied uniformly to both
    /// axes since the resize preserves aspect ratio.
    pub scale: f32,
}

/// Resizes `frame` to `working_height` and splits it into L*, u*, v* planes.
pub fn decompose(frame: &RgbImage, working_height: u32) -> WorkingImage {
    if frame.width() == 0 || frame.height() == 0 {
        return WorkingImage {
            planes: [GrayImage::new(0, 0), GrayImage::new(0, 0), GrayImage::new(0, 0)],
            width: 0,
            height: 0,
            scale: 1.0,
        };
    }

    let scale = working_height as f32 / frame.height() as f32;
    let width = ((frame.width() as f32 * scale).round() as u32).max(1);
    let height = working_height.max(1);
    let resized = resize(frame, width, height, FilterType::Triangle);

    let mut planes = [
        GrayImage::new(width, height),
        GrayImage::new(width, height),
        GrayImage::new(width, height),
    ];
    for (x, y, px) in resized.enumerate_pixels() {
        let [l, u, v] = luv_bytes(px.0);
        planes[0].put_pixel(x, y, image::Luma([l]));
        planes[1].put_pixel(x, y, image::Luma([u]));
        planes[2].put_pixel(x, y, image::Luma([v]));
    }

    WorkingImage {
        planes,
        width,
        height,
        scale,
    }
}

/// Converts one sRGB pixel to 8-bit L*, u*, v* components.
fn luv_bytes([r, g, b]: [u8; 3]) -> [u8; 3] {
    let srgb = Srgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    );
    let luv: Luv = Luv::from_color(srgb.into_linear());
    [
        scale_to_u8(luv.l, 0.0, 100.0),
        scale_to_u8(luv.u, -134.0, 220.0),
        scale_to_u8(luv.v, -140.0, 122.0),
    ]
}

#[inline]
fn scale_to_u8(value: f32, min: f32, max: f32) -> u8 {
    let norm = (value - min) / (max - min);
    (norm.clamp(0.0, 1.0) * 255.0).round() as u8
}
