//! Command-line tests for the `frankenfasta` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EXTERNAL: &str = ">qry1 assembled\nACGTACGTAC\n";
const DELTA: &str = "/data/ref.fa /data/ext.fa
NUCMER
>ref1 qry1 12 10
1 10 1 10 1 1 0
4
0
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn frankenfasta() -> Command {
    Command::cargo_bin("frankenfasta").unwrap()
}

#[test]
fn test_convert_writes_frankenfasta() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ecoli.fasta", EXTERNAL);
    let delta = write(dir.path(), "ecoli.filtered.delta", DELTA);
    let output = dir.path().join("out.frankenfasta");

    frankenfasta()
        .arg("convert")
        .arg("--external")
        .arg(&external)
        .arg("--delta")
        .arg(&delta)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Projection of 'ecoli'"));

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, ">franken::ref1\nACG!TACGTAXX\n");
}

#[test]
fn test_convert_defaults_paths_from_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "sample_7.fa", EXTERNAL);
    write(dir.path(), "sample_7.filtered.delta", DELTA);

    frankenfasta()
        .current_dir(dir.path())
        .args(["convert", "--external", "sample_7.fa"])
        .assert()
        .success();

    assert!(dir.path().join("sample_7.frankenfasta").exists());
}

#[test]
fn test_convert_with_reference_adds_unaligned_contigs() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ext.fa", EXTERNAL);
    let delta = write(dir.path(), "ext.delta", DELTA);
    let reference = write(dir.path(), "ref.fa.fai", "ref1\t12\t6\t12\t13\nref2\t3\t25\t3\t4\n");
    let output = dir.path().join("ext.frankenfasta");

    frankenfasta()
        .args(["--format", "json", "convert", "--header-prefix", "ext::"])
        .arg("--external")
        .arg(&external)
        .arg("--delta")
        .arg(&delta)
        .arg("--reference")
        .arg(&reference)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contigs\": 2"))
        .stdout(predicate::str::contains("\"reference_gaps\": 1"));

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, ">ext::ref1\nACG!TACGTAXX\n>ext::ref2\nXXX\n");
}

#[test]
fn test_convert_reference_length_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ext.fa", EXTERNAL);
    let delta = write(dir.path(), "ext.delta", DELTA);
    let reference = write(dir.path(), "ref.fa", ">ref1\nACGT\n");

    frankenfasta()
        .current_dir(dir.path())
        .arg("convert")
        .arg("--external")
        .arg(&external)
        .arg("--delta")
        .arg(&delta)
        .arg("--reference")
        .arg(&reference)
        .assert()
        .failure()
        .stderr(predicate::str::contains("declared with length 12, expected 4"));
}

#[test]
fn test_convert_strict_rejects_malformed_delta() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ext.fa", EXTERNAL);
    let delta = write(dir.path(), "ext.delta", &format!("{DELTA}not a delta line\n"));

    frankenfasta()
        .current_dir(dir.path())
        .args(["convert", "--strict"])
        .arg("--external")
        .arg(&external)
        .arg("--delta")
        .arg(&delta)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed delta line 7"));

    frankenfasta()
        .current_dir(dir.path())
        .args(["--format", "tsv", "convert"])
        .arg("--external")
        .arg(&external)
        .arg("--delta")
        .arg(&delta)
        .assert()
        .success()
        .stdout(predicate::str::contains("ext\t1\t9\t1\t2\t1\t0\t1\t1"));
}

#[test]
fn test_convert_rejects_unsafe_name() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ext.fa", EXTERNAL);

    frankenfasta()
        .args(["convert", "--name", "../escape"])
        .arg("--external")
        .arg(&external)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid genome name"));
}

#[test]
fn test_convert_missing_delta_fails() {
    let dir = TempDir::new().unwrap();
    let external = write(dir.path(), "ext.fa", EXTERNAL);

    frankenfasta()
        .current_dir(dir.path())
        .arg("convert")
        .arg("--external")
        .arg(&external)
        .assert()
        .failure()
        .stderr(predicate::str::contains("ext.filtered.delta"));
}

#[test]
fn test_inspect_text() {
    let dir = TempDir::new().unwrap();
    let delta = write(dir.path(), "ext.delta", DELTA);

    frankenfasta()
        .arg("inspect")
        .arg(&delta)
        .assert()
        .success()
        .stdout(predicate::str::contains("Program: NUCMER"))
        .stdout(predicate::str::contains("Contig pairs: 1"))
        .stdout(predicate::str::contains("ref1 (12 bp) <- qry1 (10 bp)"));
}

#[test]
fn test_inspect_tsv() {
    let dir = TempDir::new().unwrap();
    let delta = write(dir.path(), "ext.delta", DELTA);

    frankenfasta()
        .args(["--format", "tsv", "inspect"])
        .arg(&delta)
        .assert()
        .success()
        .stdout(predicate::str::contains("ref1\tqry1\t12\t10\t1\t0\t10\t0\t1\t1"));
}
