//! Configuration for the `scan_demo` tool: JSON file plus CLI overrides.
use crate::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the rectified document image.
    pub rectified_image: Option<PathBuf>,
    /// Where to write the JSON report.
    pub json_out: Option<PathBuf>,
    /// Directory for debug artifacts (report, channel planes, rectified).
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScanToolConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Load a full tool configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ScanToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parse the command line: `<input> [--config cfg.json] [--json out]
/// [--rectified out.png] [--debug-dir dir]`.
///
/// A `--config` file provides the base configuration; the positional input
/// and the remaining flags override it.
pub fn parse_cli(program: &str) -> Result<ScanToolConfig, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(program, &args)
}

fn parse_args(program: &str, args: &[String]) -> Result<ScanToolConfig, String> {
    let usage = format!(
        "Usage: {program} <input-image> [--config cfg.json] [--json report.json] \
         [--rectified out.png] [--debug-dir dir]"
    );

    let mut input: Option<PathBuf> = None;
    let mut config: Option<ScanToolConfig> = None;
    let mut output = OutputConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| usage.clone())?;
                config = Some(load_config(Path::new(path))?);
            }
            "--json" => {
                let path = iter.next().ok_or_else(|| usage.clone())?;
                output.json_out = Some(PathBuf::from(path));
            }
            "--rectified" => {
                let path = iter.next().ok_or_else(|| usage.clone())?;
                output.rectified_image = Some(PathBuf::from(path));
            }
            "--debug-dir" => {
                let path = iter.next().ok_or_else(|| usage.clone())?;
                output.debug_dir = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Err(usage),
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown flag {flag}\n{usage}"));
            }
            positional => {
                if input.is_some() {
                    return Err(format!("Unexpected argument {positional}\n{usage}"));
                }
                input = Some(PathBuf::from(positional));
            }
        }
    }

    let mut resolved = match config {
        Some(cfg) => cfg,
        None => ScanToolConfig {
            input_path: PathBuf::new(),
            detector: DetectorParams::default(),
            output: OutputConfig::default(),
        },
    };
    if let Some(input) = input {
        resolved.input_path = input;
    }
    if resolved.input_path.as_os_str().is_empty() {
        return Err(usage);
    }
    if output.json_out.is_some() {
        resolved.output.json_out = output.json_out;
    }
    if output.rectified_image.is_some() {
        resolved.output.rectified_image = output.rectified_image;
    }
    if output.debug_dir.is_some() {
        resolved.output.debug_dir = output.debug_dir;
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positional_input_and_flags() {
        let cfg = parse_args(
            "scan_demo",
            &strings(&["frame.png", "--json", "report.json"]),
        )
        .expect("parses");
        assert_eq!(cfg.input_path, PathBuf::from("frame.png"));
        assert_eq!(cfg.output.json_out, Some(PathBuf::from("report.json")));
        assert_eq!(cfg.detector.working_height, 500);
    }

    #[test]
    fn missing_input_reports_usage() {
        let err = parse_args("scan_demo", &strings(&["--json", "out.json"])).unwrap_err();
        assert!(err.starts_with("Usage:"), "{err}");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse_args("scan_demo", &strings(&["frame.png", "--bogus"])).unwrap_err();
        assert!(err.contains("Unknown flag --bogus"), "{err}");
    }
}
