extern crate bvr_postprocess;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use serde_json::Value;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bvr_postprocess_cli_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_cli(dir: &Path, dump: &str) -> std::process::Output {
    let labels = dir.join("labels.names");
    let config = dir.join("postprocess.json");
    let input = dir.join("dump.json");
    fs::write(&labels, "person\nbicycle\n").unwrap();
    fs::write(&config, "{}").unwrap();
    fs::write(&input, dump).unwrap();

    Command::new(env!("CARGO_BIN_EXE_bvr_postprocess"))
        .arg("--input").arg(&input)
        .arg("--labels").arg(&labels)
        .arg("--config").arg(&config)
        .output()
        .unwrap()
}

#[test]
fn cli_prints_detections_as_json() {
    let dir = temp_dir("single");
    let dump = r#"{
        "target_width": 416,
        "target_height": 416,
        "tensors": [[[0.5, 0.5, 0.2, 0.2, 0.9, 0.95, 0.1]]]
    }"#;

    let output = run_cli(&dir, dump);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"], "person: 1");
    assert_eq!(json["skipped_rows"], 0);
    assert_eq!(json["detections"][0]["label"], "person");
    assert_eq!(json["detections"][0]["bbox"]["x1"], 166);
    assert_eq!(json["detections"][0]["bbox"]["w"], 83);
}

#[test]
fn cli_skips_malformed_tensors() {
    let dir = temp_dir("malformed");
    // tensor 0 is ragged, tensor 1 has rows too short for two classes
    let dump = r#"{
        "target_width": 416,
        "target_height": 416,
        "tensors": [
            [[0.5, 0.5, 0.2, 0.2, 0.9], [0.5, 0.5, 0.2, 0.2, 0.9, 0.95, 0.1]],
            [[0.5, 0.5, 0.2, 0.2, 0.9]],
            [[0.2, 0.2, 0.1, 0.1, 0.9, 0.1, 0.8]]
        ]
    }"#;

    let output = run_cli(&dir, dump);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"], "bicycle: 1");
    assert_eq!(json["skipped_tensors"], 2);
    assert_eq!(json["skipped_rows"], 3);
    assert_eq!(json["detections"].as_array().unwrap().len(), 1);
}

#[test]
fn cli_fails_on_unreadable_dump() {
    let dir = temp_dir("unreadable");

    let output = run_cli(&dir, "not json");

    assert!(!output.status.success());
}
