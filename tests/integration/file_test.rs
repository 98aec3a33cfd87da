//! Integration tests for converting configuration files through the binary

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const DISPLAY_XML: &str = r#"<config>
  <DisplaySettings FullScreen="true" Width="1920" Gamma="1.2" WindowTitle="MyGame"/>
</config>"#;

fn run_retroconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_retroconv"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run retroconv")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_converts_to_sibling_toml() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("display.xml");
    fs::write(&input, DISPLAY_XML).unwrap();

    let output = run_retroconv(&["config", path_arg(&input)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let toml_text = fs::read_to_string(dir.path().join("display.toml")).unwrap();
    let table: toml::Table = toml_text.parse().unwrap();
    let section = table["display_settings"].as_table().unwrap();
    assert_eq!(section["full_screen"].as_bool(), Some(true));
    assert_eq!(section["width"].as_integer(), Some(1920));
    assert_eq!(section["gamma"].as_float(), Some(1.2));
    assert_eq!(section["window_title"].as_str(), Some("MyGame"));
}

#[test]
fn test_stdout_mode_writes_no_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("audio.xml");
    fs::write(&input, r#"<config><Audio sound_volume="80"/></config>"#).unwrap();

    let output = run_retroconv(&["config", path_arg(&input), "--stdout"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[audio]"));
    assert!(stdout.contains("sound_volume = 80"));
    assert!(!dir.path().join("audio.toml").exists());
}

#[test]
fn test_explicit_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("display.xml");
    let target = dir.path().join("out/settings.toml");
    fs::write(&input, DISPLAY_XML).unwrap();

    let output = run_retroconv(&["config", path_arg(&input), "--output", path_arg(&target)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(target.exists());
    assert!(!dir.path().join("display.toml").exists());
}

#[test]
fn test_no_infer_keeps_strings() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("display.xml");
    fs::write(&input, DISPLAY_XML).unwrap();

    let output = run_retroconv(&["config", path_arg(&input), "--stdout", "--no-infer"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"width = "1920""#));
}

#[test]
fn test_header_comment_leads_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("display.xml");
    fs::write(&input, DISPLAY_XML).unwrap();

    let output = run_retroconv(&["config", path_arg(&input), "--header", "Migrated settings"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let toml_text = fs::read_to_string(dir.path().join("display.toml")).unwrap();
    assert!(toml_text.starts_with("# Migrated settings\n"), "got: {}", toml_text);
    let table: toml::Table = toml_text.parse().unwrap();
    assert!(table.contains_key("display_settings"));
}

#[test]
fn test_reads_standard_input() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_retroconv"))
        .args(["config", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(DISPLAY_XML.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("[display_settings]"));
}

#[test]
fn test_invalid_file_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<config><Audio>").unwrap();

    let output = run_retroconv(&["config", path_arg(&input)]);
    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
    assert!(!dir.path().join("broken.toml").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = tempdir().unwrap();
    let output = run_retroconv(&["config", path_arg(&dir.path().join("nope.xml"))]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_directory_input_with_stats() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.xml"), r#"<config><A X="1"/></config>"#).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/b.xml"), r#"<config><B Y="yes"/></config>"#).unwrap();

    let output = run_retroconv(&["config", path_arg(dir.path()), "--recursive", "--stats"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files converted: 2"));
    assert!(dir.path().join("a.toml").exists());
    assert!(dir.path().join("nested/b.toml").exists());
}
