//! CLI integration tests for the agif binary
//!
//! These tests write small animations with the library encoder, run the
//! binary against them and check its output files and exit codes.

use animgif::encoder::write_gif;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;
use tempfile::TempDir;

/// Get the path to the agif binary
fn agif_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agif"))
}

fn run_agif(dir: &Path, args: &[&str]) -> Output {
    Command::new(agif_binary())
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute agif")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Write a 4x3 animation with distinct solid frames
fn write_fixture(path: &Path, delays_ms: &[u64], loop_count: u32) {
    let colors = [
        Rgba([255, 0, 0, 255]),
        Rgba([0, 255, 0, 255]),
        Rgba([0, 0, 255, 255]),
    ];
    let frames: Vec<RgbaImage> = (0..delays_ms.len())
        .map(|i| RgbaImage::from_pixel(4, 3, colors[i % colors.len()]))
        .collect();
    let durations: Vec<Duration> = delays_ms.iter().map(|ms| Duration::from_millis(*ms)).collect();
    write_gif(&frames, &durations, loop_count, path).expect("should write fixture GIF");
}

#[test]
fn test_info_text() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("spin.gif"), &[100, 200, 300], 0);

    let output = run_agif(temp.path(), &["info", "spin.gif"]);
    assert!(output.status.success(), "info failed: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Frames:    3"), "unexpected output: {}", text);
    assert!(text.contains("Duration:  600 ms"), "unexpected output: {}", text);
    assert!(text.contains("forever"), "unexpected output: {}", text);
}

#[test]
fn test_info_json() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("spin@2x.gif"), &[100, 10, 50], 3);

    let output = run_agif(temp.path(), &["info", "spin@2x.gif", "--json"]);
    assert!(output.status.success(), "info failed: {}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("info --json should print JSON");
    assert_eq!(json["animated"], true);
    assert_eq!(json["frames"], 3);
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 3);
    assert_eq!(json["scale"], 2.0);
    assert_eq!(json["loop_count"], 3);
    // 10ms is below the minimum delay and falls back to 100ms
    assert_eq!(json["frame_durations_ms"], serde_json::json!([100, 100, 50]));
    assert_eq!(json["total_duration_ms"], 250);
}

#[test]
fn test_info_static_png() {
    let temp = TempDir::new().expect("should create temp dir");
    RgbaImage::from_pixel(5, 2, Rgba([1, 2, 3, 255]))
        .save(temp.path().join("still.png"))
        .expect("should write PNG");

    let output = run_agif(temp.path(), &["info", "still.png", "--json"]);
    assert!(output.status.success(), "info failed: {}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("info --json should print JSON");
    assert_eq!(json["animated"], false);
    assert_eq!(json["frames"], 1);
    assert_eq!(json["width"], 5);
}

#[test]
fn test_info_missing_file() {
    let temp = TempDir::new().expect("should create temp dir");

    let output = run_agif(temp.path(), &["info", "nope.gif"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn test_extract_all_frames() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("walk@2x.gif"), &[100, 100, 100], 0);

    let output = run_agif(temp.path(), &["extract", "walk@2x.gif", "-o", "frames"]);
    assert!(output.status.success(), "extract failed: {}", stderr(&output));

    for i in 0..3 {
        let path = temp.path().join("frames").join(format!("walk_{:03}.png", i));
        let img = image::open(&path).expect("extracted frame should exist");
        assert_eq!((img.width(), img.height()), (4, 3));
    }
}

#[test]
fn test_extract_single_frame_scaled() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("walk.gif"), &[100, 100], 0);

    let output = run_agif(temp.path(), &["extract", "walk.gif", "--frame", "1", "--scale", "3"]);
    assert!(output.status.success(), "extract failed: {}", stderr(&output));

    let img = image::open(temp.path().join("walk_001.png")).expect("frame 1 should exist");
    assert_eq!((img.width(), img.height()), (12, 9));
    assert!(!temp.path().join("walk_000.png").exists());
}

#[test]
fn test_extract_frame_out_of_range() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("walk.gif"), &[100, 100], 0);

    let output = run_agif(temp.path(), &["extract", "walk.gif", "--frame", "7"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("out of range"));
}

#[test]
fn test_sheet_with_layout() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("walk.gif"), &[100, 200, 300], 0);

    let output = run_agif(
        temp.path(),
        &["sheet", "walk.gif", "-o", "sheet.png", "--cols", "2", "--layout"],
    );
    assert!(output.status.success(), "sheet failed: {}", stderr(&output));

    let img = image::open(temp.path().join("sheet.png")).expect("sheet should exist");
    assert_eq!((img.width(), img.height()), (8, 6));

    let layout = std::fs::read_to_string(temp.path().join("sheet.json")).expect("layout should exist");
    let json: serde_json::Value = serde_json::from_str(&layout).expect("layout should be JSON");
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[2]["x"], 0);
    assert_eq!(json[2]["y"], 3);
    assert_eq!(json[2]["duration_ms"], 300);
}

#[test]
fn test_assemble_round_trips_through_info() {
    let temp = TempDir::new().expect("should create temp dir");
    for (i, color) in [[255, 0, 0, 255], [0, 0, 255, 255]].iter().enumerate() {
        RgbaImage::from_pixel(6, 6, Rgba(*color))
            .save(temp.path().join(format!("f{}.png", i)))
            .expect("should write PNG");
    }

    let output = run_agif(
        temp.path(),
        &["assemble", "f0.png", "f1.png", "-o", "out.gif", "--delay", "70", "--loops", "2"],
    );
    assert!(output.status.success(), "assemble failed: {}", stderr(&output));

    let gif = animgif::GifImage::open(temp.path().join("out.gif")).expect("output should decode");
    assert_eq!(gif.frame_count(), 2);
    assert_eq!(gif.loop_count(), 2);
    assert_eq!(gif.frame_durations(), &[Duration::from_millis(70); 2]);
}

#[test]
fn test_assemble_missing_frame() {
    let temp = TempDir::new().expect("should create temp dir");

    let output = run_agif(temp.path(), &["assemble", "missing.png", "-o", "out.gif"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp.path().join("out.gif").exists());
}

#[test]
fn test_timeline_finite_animation() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("blink.gif"), &[100, 100], 2);

    let output = run_agif(temp.path(), &["timeline", "blink.gif", "--fps", "100"]);
    assert!(output.status.success(), "timeline failed: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("finished after 2 loop(s)"), "unexpected output: {}", text);
}

#[test]
fn test_timeline_rejects_unrepresentable_seconds() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("blink.gif"), &[100, 100], 0);

    for seconds in ["1e20", "-1", "NaN"] {
        let output = run_agif(
            temp.path(),
            &["timeline", "blink.gif", &format!("--seconds={}", seconds)],
        );
        assert_eq!(output.status.code(), Some(2), "--seconds {}: {}", seconds, stderr(&output));
        assert!(stderr(&output).contains("--seconds"));
    }
}

#[test]
fn test_timeline_rejects_static_gif() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("still.gif"), &[100], 0);

    let output = run_agif(temp.path(), &["timeline", "still.gif"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_file_changes_delay_policy() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("fast.gif"), &[10, 10], 0);
    std::fs::write(
        temp.path().join("agif.toml"),
        "[timing]\nmin_delay_ms = 0\n",
    )
    .expect("should write config");

    let output = run_agif(temp.path(), &["info", "fast.gif", "--json"]);
    assert!(output.status.success(), "info failed: {}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("info --json should print JSON");
    assert_eq!(json["frame_durations_ms"], serde_json::json!([10, 10]));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    write_fixture(&temp.path().join("walk.gif"), &[100, 100], 0);
    std::fs::write(temp.path().join("bad.toml"), "[output]\nscale = 99\n").expect("should write config");

    let output = run_agif(temp.path(), &["--config", "bad.toml", "info", "walk.gif"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("output.scale"));
}
