mod common;

use common::synthetic_image::{
    document_scene, fill_polygon, polygon_scene, rotated_rect_corners, DARK_BG, LIGHT_FILL,
};
use doc_detector::{DetectorParams, DocumentDetector, OrderedQuad, Point};
use image::Rgb;

// TL, TR, BR, BL — mild perspective, well inside the frame.
const CORNERS: [[f32; 2]; 4] = [
    [120.0, 90.0],
    [520.0, 110.0],
    [500.0, 400.0],
    [100.0, 380.0],
];

fn assert_close(actual: Point, expected: Point, tol: f32, label: &str) {
    let dx = actual[0] - expected[0];
    let dy = actual[1] - expected[1];
    let dist = dx.hypot(dy);
    assert!(
        dist <= tol,
        "{label}: {actual:?} is {dist:.2}px from {expected:?} (tol {tol})"
    );
}

fn assert_corners_close(found: &OrderedQuad, expected: &[[f32; 2]; 4], tol: f32) {
    assert_close(found.top_left, expected[0], tol, "top-left");
    assert_close(found.top_right, expected[1], tol, "top-right");
    assert_close(found.bottom_right, expected[2], tol, "bottom-right");
    assert_close(found.bottom_left, expected[3], tol, "bottom-left");
}

#[test]
fn corners_recovered_on_synthetic_document() {
    let frame = document_scene(640, 480, &CORNERS);
    let detector = DocumentDetector::new(DetectorParams::default());
    let scan = detector
        .process(&frame)
        .expect("geometry is well formed")
        .expect("document present");
    assert_corners_close(&scan.corners, &CORNERS, 8.0);
}

#[test]
fn detection_is_scale_invariant() {
    let detector = DocumentDetector::new(DetectorParams::default());

    let frame = document_scene(640, 480, &CORNERS);
    let base = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");

    let doubled = CORNERS.map(|[x, y]| [x * 2.0, y * 2.0]);
    let frame2x = document_scene(1280, 960, &doubled);
    let scaled = detector
        .process(&frame2x)
        .expect("well formed")
        .expect("document present");

    let halved = OrderedQuad {
        top_left: [scaled.corners.top_left[0] / 2.0, scaled.corners.top_left[1] / 2.0],
        top_right: [
            scaled.corners.top_right[0] / 2.0,
            scaled.corners.top_right[1] / 2.0,
        ],
        bottom_left: [
            scaled.corners.bottom_left[0] / 2.0,
            scaled.corners.bottom_left[1] / 2.0,
        ],
        bottom_right: [
            scaled.corners.bottom_right[0] / 2.0,
            scaled.corners.bottom_right[1] / 2.0,
        ],
    };
    assert_close(halved.top_left, base.corners.top_left, 8.0, "top-left");
    assert_close(halved.top_right, base.corners.top_right, 8.0, "top-right");
    assert_close(
        halved.bottom_left,
        base.corners.bottom_left,
        8.0,
        "bottom-left",
    );
    assert_close(
        halved.bottom_right,
        base.corners.bottom_right,
        8.0,
        "bottom-right",
    );
}

#[test]
fn repeated_invocations_are_byte_identical() {
    let frame = document_scene(640, 480, &CORNERS);
    let detector = DocumentDetector::new(DetectorParams::default());

    let first = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");
    let second = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");

    assert_eq!(first.corners, second.corners);
    assert_eq!(first.rectified.dimensions(), second.rectified.dimensions());
    assert_eq!(first.rectified.as_raw(), second.rectified.as_raw());
}

#[test]
fn blank_frame_reports_not_found() {
    let frame = image::RgbImage::from_pixel(640, 480, Rgb([250, 250, 250]));
    let detector = DocumentDetector::new(DetectorParams::default());
    assert!(detector.process(&frame).expect("no geometry error").is_none());
}

#[test]
fn rectified_aspect_ratio_matches_card() {
    // 400×240 card (5:3) rotated a few degrees.
    let corners = rotated_rect_corners(800, 600, 400.0, 240.0, 5.0);
    let frame = document_scene(800, 600, &corners);
    let detector = DocumentDetector::new(DetectorParams::default());
    let scan = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");

    let ratio = scan.width() as f32 / scan.height() as f32;
    let expected = 400.0 / 240.0;
    assert!(
        (ratio - expected).abs() / expected <= 0.05,
        "aspect ratio {ratio:.3}, expected {expected:.3} ±5%"
    );
}

#[test]
fn rectified_output_is_not_mirrored() {
    // Document with a red marker patch in its top-left quadrant. Whatever
    // winding the contour trace produced, the marker must land in the
    // rectified output's top-left quadrant — a mirrored or rotated warp
    // moves it elsewhere.
    let mut frame = document_scene(640, 480, &CORNERS);
    let marker = [
        [160.0, 130.0],
        [240.0, 135.0],
        [238.0, 200.0],
        [158.0, 195.0],
    ];
    fill_polygon(&mut frame, &marker, Rgb([190, 30, 30]));

    let detector = DocumentDetector::new(DetectorParams::default());
    let scan = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");

    let (w, h) = scan.rectified.dimensions();
    let redness = |fx: f32, fy: f32| {
        let px = scan
            .rectified
            .get_pixel((fx * w as f32) as u32, (fy * h as f32) as u32);
        px[0] as i32 - px[1] as i32
    };
    let top_left = redness(0.2, 0.2);
    assert!(
        top_left > 60,
        "expected red marker in top-left quadrant, redness={top_left}"
    );
    for (fx, fy, label) in [
        (0.8, 0.2, "top-right"),
        (0.2, 0.8, "bottom-left"),
        (0.8, 0.8, "bottom-right"),
    ] {
        let r = redness(fx, fy);
        assert!(r < 40, "{label} quadrant unexpectedly red: {r}");
    }
}

#[test]
fn nonconvex_contour_is_never_selected() {
    // A large dart (4 vertices, one reflex) and a smaller convex quad. The
    // dart covers more area but must be rejected by the convexity gate.
    let dart = [
        [100.0, 100.0],
        [400.0, 250.0],
        [100.0, 400.0],
        [200.0, 250.0],
    ];
    let quad = [
        [450.0, 120.0],
        [600.0, 130.0],
        [590.0, 300.0],
        [455.0, 280.0],
    ];
    let mut frame = polygon_scene(800, 600, &dart, DARK_BG, LIGHT_FILL);
    fill_polygon(&mut frame, &quad, LIGHT_FILL);

    let detector = DocumentDetector::new(DetectorParams::default());
    let scan = detector
        .process(&frame)
        .expect("well formed")
        .expect("convex candidate present");

    for corner in [
        scan.corners.top_left,
        scan.corners.top_right,
        scan.corners.bottom_left,
        scan.corners.bottom_right,
    ] {
        assert!(
            corner[0] > 420.0,
            "corner {corner:?} lies in the dart region — non-convex contour selected"
        );
    }
}

#[test]
fn payload_and_bitmap_paths_agree() {
    use base64::Engine;
    use std::io::Cursor;

    let frame = document_scene(640, 480, &CORNERS);
    let mut bytes = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("in-memory PNG encode");
    let payload = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );

    let detector = DocumentDetector::new(DetectorParams::default());
    let direct = detector
        .process(&frame)
        .expect("well formed")
        .expect("document present");
    let decoded = detector
        .process_payload(&payload)
        .expect("payload decodes")
        .expect("document present");

    assert_eq!(direct.corners, decoded.corners);
    assert_eq!(
        direct.rectified.dimensions(),
        decoded.rectified.dimensions()
    );
}
