mod common;
use crate::common::{data_path, normalize_tsv, run_kinact};
use insta::assert_snapshot;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn prepare_writes_site_and_fasta_files() {
    let dir = TempDir::new().unwrap();
    run_kinact(&[
        "prepare",
        "-s",
        &data_path("sites.txt"),
        "--fasta",
        &data_path("sequences.fasta"),
        "-d",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();

    let sites = fs::read_to_string(dir.path().join("site_file.txt")).unwrap();
    assert_snapshot!(normalize_tsv(&sites), @r"
    A|59|S
    B|10|T
    A|100|Y
    ");

    let fasta = fs::read_to_string(dir.path().join("fasta_file.txt")).unwrap();
    assert_snapshot!(fasta, @r"
    >A
    MSTSY
    >B
    MKTT
    ");
}

#[test]
fn fold_change_against_baseline() {
    let p_values = NamedTempFile::new().unwrap();
    let output = run_kinact(&[
        "fold-change",
        "-i",
        &data_path("dataset.csv"),
        "--p-values",
        p_values.path().to_str().unwrap(),
    ])
    .unwrap();

    assert_snapshot!(normalize_tsv(&output), @r"
    site|5min|10min
    P06239_S59|1.5|-1
    P43403_Y319||1
    ");

    let written = fs::read_to_string(p_values.path()).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "site\t5min\t10min");
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("P43403_Y319\t"));
    assert!(lines[2].ends_with('\t'));
}
