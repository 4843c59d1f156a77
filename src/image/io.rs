//! I/O helpers for frames and JSON reports.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned RGB buffer.
//! - `decode_rgb_payload`: decode a base64 (or `data:` URL) frame payload.
//! - `save_rgb_image` / `save_gray_image`: write buffers to PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::DecodeError;
use base64::Engine;
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    Ok(img)
}

/// Decode an encoded frame payload into an RGB buffer.
///
/// Accepts raw base64 or a `data:image/...;base64,` URL; the decoder never
/// returns a partially decoded buffer — any corruption surfaces as
/// [`DecodeError`].
pub fn decode_rgb_payload(payload: &str) -> Result<RgbImage, DecodeError> {
    let trimmed = payload.trim();
    let encoded = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.into_rgb8())
}

/// Save an RGB buffer to disk, creating parent directories.
pub fn save_rgb_image(buffer: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a single-channel buffer to disk, creating parent directories.
pub fn save_gray_image(buffer: &GrayImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
