use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::PathBuf;
use std::process::{Command, Output};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("matte-bin-{}-{}", std::process::id(), name))
}

fn write_input(name: &str) -> PathBuf {
    let mut img = RgbImage::from_pixel(6, 4, Rgb([255, 255, 255]));
    img.put_pixel(1, 1, Rgb([20, 30, 40]));
    let path = temp_path(name);
    DynamicImage::ImageRgb8(img).save(&path).expect("Should write fixture");
    path
}

fn run_matte(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_matte"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Should launch the matte binary")
}

#[test]
fn test_success_prints_confirmation_then_base64_block() {
    let input = write_input("ok-input.png");
    let output = temp_path("ok-output.png");

    let result = run_matte(&[input.as_os_str(), output.as_os_str()]);
    assert_eq!(result.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let stdout = String::from_utf8(result.stdout).expect("Should be utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "unexpected stdout: {stdout}");
    assert_eq!(lines[0], format!("Saved transparent image to {}", output.display()));
    assert_eq!(lines[1], "BASE64_START");
    assert_eq!(lines[3], "BASE64_END");

    let encoded = STANDARD.decode(lines[2]).expect("Should be standard base64");
    let written = std::fs::read(&output).expect("Should read output");
    assert_eq!(encoded, written);

    let decoded = image::load_from_memory(&encoded).expect("Should decode PNG").to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(decoded.get_pixel(1, 1).0, [20, 30, 40, 255]);

    let _ = std::fs::remove_file(input);
    let _ = std::fs::remove_file(output);
}

#[test]
fn test_no_base64_flag() {
    let input = write_input("quiet-input.png");
    let output = temp_path("quiet-output.png");

    let result = run_matte(&[input.as_os_str(), output.as_os_str(), std::ffi::OsStr::new("--no-base64")]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).expect("Should be utf-8");
    assert_eq!(stdout, format!("Saved transparent image to {}\n", output.display()));

    let _ = std::fs::remove_file(input);
    let _ = std::fs::remove_file(output);
}

#[test]
fn test_missing_output_argument_exits_with_usage() {
    let input = write_input("usage-input.png");

    let result = run_matte(&[input.as_os_str()]);
    assert!(!result.status.success());
    assert_eq!(result.status.code(), Some(2));
    assert!(result.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");

    let _ = std::fs::remove_file(input);
}

#[test]
fn test_unreadable_input_exits_with_error() {
    let input = temp_path("nope.png");
    let output = temp_path("never-written.png");

    let result = run_matte(&[input.as_os_str(), output.as_os_str()]);
    assert!(!result.status.success());
    assert_ne!(result.status.code(), Some(0));
    assert!(result.stdout.is_empty(), "nothing should reach stdout on failure");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains(&format!("Could not read image at {}", input.display())),
        "stderr: {stderr}"
    );
    assert!(!output.exists());
}
