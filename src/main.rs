use doc_detector::{DetectorParams, DocumentDetector};
use image::RgbImage;

fn main() {
    // Demo stub: runs the detector on a blank synthetic frame.
    let frame = RgbImage::from_pixel(640, 480, image::Rgb([240, 240, 240]));

    let detector = DocumentDetector::new(DetectorParams::default());
    match detector.process(&frame) {
        Ok(Some(scan)) => println!(
            "found document, rectified {}x{} latency_ms={:.3}",
            scan.width(),
            scan.height(),
            scan.latency_ms
        ),
        Ok(None) => println!("no document in frame"),
        Err(err) => eprintln!("rectification failed: {err}"),
    }
}
