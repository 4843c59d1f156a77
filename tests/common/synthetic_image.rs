use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

pub const DARK_BG: Rgb<u8> = Rgb([28, 30, 34]);
pub const LIGHT_FILL: Rgb<u8> = Rgb([225, 222, 214]);

/// Generates a background frame with one filled polygon.
pub fn polygon_scene(
    width: u32,
    height: u32,
    vertices: &[[f32; 2]],
    background: Rgb<u8>,
    fill: Rgb<u8>,
) -> RgbImage {
    let mut frame = RgbImage::from_pixel(width, height, background);
    fill_polygon(&mut frame, vertices, fill);
    frame
}

/// Paints a filled polygon onto an existing frame.
pub fn fill_polygon(frame: &mut RgbImage, vertices: &[[f32; 2]], fill: Rgb<u8>) {
    assert!(vertices.len() >= 3, "polygon needs at least 3 vertices");
    let poly: Vec<Point<i32>> = vertices
        .iter()
        .map(|p| Point::new(p[0].round() as i32, p[1].round() as i32))
        .collect();
    draw_polygon_mut(frame, &poly, fill);
}

/// A light document quadrilateral on a dark background.
pub fn document_scene(width: u32, height: u32, corners: &[[f32; 2]; 4]) -> RgbImage {
    polygon_scene(width, height, corners, DARK_BG, LIGHT_FILL)
}

/// Corner set of an axis-aligned `doc_w`×`doc_h` rectangle rotated by
/// `angle_deg` about the frame centre, in TL, TR, BR, BL order.
pub fn rotated_rect_corners(
    frame_w: u32,
    frame_h: u32,
    doc_w: f32,
    doc_h: f32,
    angle_deg: f32,
) -> [[f32; 2]; 4] {
    let (cx, cy) = (frame_w as f32 / 2.0, frame_h as f32 / 2.0);
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let half = [
        [-doc_w / 2.0, -doc_h / 2.0],
        [doc_w / 2.0, -doc_h / 2.0],
        [doc_w / 2.0, doc_h / 2.0],
        [-doc_w / 2.0, doc_h / 2.0],
    ];
    half.map(|[x, y]| [cx + x * cos - y * sin, cy + x * sin + y * cos])
}
