#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;

/// Absolute path of a fixture under `tests/data`
pub fn data_path(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path.to_string_lossy().into_owned()
}

/// Runs the kinact CLI quietly with given arguments and returns its stdout
pub fn run_kinact(args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("kinact")?;
    cmd.arg("-q").args(args);

    let output = cmd.assert().success().get_output().stdout.clone();
    Ok(String::from_utf8(output)?)
}

/// Makes tab-separated output readable in inline snapshots.
/// Tabs become `|` so empty trailing cells stay visible.
pub fn normalize_tsv(s: &str) -> String {
    s.replace('\t', "|")
}
