use doc_detector::channels::{decompose, PLANE_NAMES};
use doc_detector::config::scan::{self, ScanToolConfig};
use doc_detector::diagnostics::PipelineTrace;
use doc_detector::image::io::{
    load_rgb_image, save_gray_image, save_rgb_image, write_json_file,
};
use doc_detector::types::Scan;
use doc_detector::DocumentDetector;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "scan_demo".to_string());
    let config = scan::parse_cli(&program)?;

    let frame = load_rgb_image(&config.input_path)?;
    let detector = DocumentDetector::new(config.detector.clone());
    let (outcome, trace) = detector.process_with_diagnostics(&frame);

    print_text_summary(&outcome, &trace);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &trace)?;
        println!("\nJSON report written to {}", path.display());
    }

    match &outcome {
        Ok(Some(scan)) => {
            if let Some(path) = &config.output.rectified_image {
                save_rgb_image(&scan.rectified, path)?;
                println!("Rectified image written to {}", path.display());
            }
        }
        Ok(None) => {}
        Err(err) => return Err(format!("Rectification failed: {err}")),
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &frame, &outcome, &trace, &config)?;
        println!("Debug artifacts written to {}", dir.display());
    }

    Ok(())
}

fn print_text_summary(
    outcome: &Result<Option<Scan>, doc_detector::RectifyError>,
    trace: &PipelineTrace,
) {
    println!("Detection summary");
    println!("  input: {}x{}", trace.input.width, trace.input.height);
    if let Some(working) = &trace.working {
        println!(
            "  working: {}x{} (scale {:.4})",
            working.width, working.height, working.scale
        );
    }
    for report in &trace.channels {
        match report.area {
            Some(area) => println!("  channel {}: candidate area={:.1}", report.name, area),
            None => println!("  channel {}: no candidate", report.name),
        }
    }

    match outcome {
        Ok(Some(scan)) => {
            let c = &scan.corners;
            println!("  corners:");
            println!("    top-left:     [{:.1}, {:.1}]", c.top_left[0], c.top_left[1]);
            println!(
                "    top-right:    [{:.1}, {:.1}]",
                c.top_right[0], c.top_right[1]
            );
            println!(
                "    bottom-left:  [{:.1}, {:.1}]",
                c.bottom_left[0], c.bottom_left[1]
            );
            println!(
                "    bottom-right: [{:.1}, {:.1}]",
                c.bottom_right[0], c.bottom_right[1]
            );
            println!("  rectified: {}x{}", scan.width(), scan.height());
            println!("  latency_ms: {:.3}", scan.latency_ms);
        }
        Ok(None) => println!("  no document found"),
        Err(err) => println!("  rectification failed: {err}"),
    }

    println!("\nTimings (ms): total={:.3}", trace.timings.total_ms);
    for stage in &trace.timings.stages {
        println!("  {}: {:.3}", stage.stage, stage.elapsed_ms);
    }
}

fn save_debug_artifacts(
    dir: &Path,
    frame: &image::RgbImage,
    outcome: &Result<Option<Scan>, doc_detector::RectifyError>,
    trace: &PipelineTrace,
    config: &ScanToolConfig,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;

    write_json_file(&dir.join("trace.json"), trace)?;

    let working = decompose(frame, config.detector.working_height);
    for (name, plane) in PLANE_NAMES.iter().zip(working.planes.iter()) {
        save_gray_image(plane, &dir.join(format!("plane_{name}.png")))?;
    }

    if let Ok(Some(scan)) = outcome {
        save_rgb_image(&scan.rectified, &dir.join("rectified.png"))?;
    }

    Ok(())
}
