//! Integration tests for mat2json CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get the mat2json command.
fn mat2json() -> Command {
    Command::cargo_bin("mat2json").unwrap()
}

/// Write a Level 5 MAT file holding one real double matrix per entry.
fn write_level5(path: &Path, vars: &[(&str, [i32; 2], &[f64])]) {
    let mut bytes = vec![b' '; 116];
    let text = b"MATLAB 5.0 MAT-file, Platform: GLNXA64, Created by: mat2json tests";
    bytes[..text.len()].copy_from_slice(text);
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend_from_slice(&0x0100u16.to_le_bytes());
    bytes.extend_from_slice(b"IM");

    for (name, dims, data) in vars {
        let mut body = Vec::new();
        element(&mut body, 6, &[6u32.to_le_bytes(), 0u32.to_le_bytes()].concat());
        element(&mut body, 5, &[dims[0].to_le_bytes(), dims[1].to_le_bytes()].concat());
        element(&mut body, 1, name.as_bytes());
        let real: Vec<u8> = data.iter().flat_map(|x| x.to_le_bytes()).collect();
        element(&mut body, 9, &real);
        element(&mut bytes, 14, &body);
    }

    fs::write(path, bytes).unwrap();
}

/// Append a tagged data element, padded to 8 bytes.
fn element(out: &mut Vec<u8>, ty: u32, data: &[u8]) {
    out.extend_from_slice(&ty.to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out.resize(out.len() + (8 - data.len() % 8) % 8, 0);
}

fn sample(temp: &TempDir) -> std::path::PathBuf {
    let input = temp.path().join("sample.mat");
    write_level5(
        &input,
        &[
            ("x", [1, 3], &[1.0, 2.0, 3.0][..]),
            ("gain", [1, 1], &[0.5][..]),
        ],
    );
    input
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    mat2json()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dump MATLAB .mat"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--var"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_version() {
    mat2json()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mat2json"));
}

#[test]
fn test_missing_input() {
    mat2json()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_nonexistent_input() {
    mat2json()
        .arg("/nonexistent/file.mat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_quiet_and_verbose() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);

    mat2json()
        .arg(&input)
        .arg("-q")
        .arg("-v")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--quiet and --verbose"));
}

#[test]
fn test_not_a_mat_file() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("dummy.mat");
    fs::write(&input, "dummy").unwrap();

    mat2json()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode MAT file"));
}

// ============================================================================
// List Mode Tests
// ============================================================================

#[test]
fn test_list_missing_file() {
    mat2json()
        .arg("--list")
        .arg("/nonexistent/file.mat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_level5() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);

    mat2json()
        .arg("--list")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 5"))
        .stdout(predicate::str::contains("  x"))
        .stdout(predicate::str::contains("  gain"))
        .stdout(predicate::str::contains("2 variables found"));
}

// ============================================================================
// Dump Tests
// ============================================================================

#[test]
fn test_dump_stdout() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);

    mat2json()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"x":[1.0,2.0,3.0],"gain":0.5}"#));
}

#[test]
fn test_dump_selected_variable() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);

    mat2json()
        .arg(&input)
        .arg("-n")
        .arg("gain")
        .arg("-n")
        .arg("missing")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"gain":0.5}"#));
}

#[test]
fn test_dump_to_file() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);
    let output = temp.path().join("out.json");

    mat2json()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(predicate::str::contains("success"));

    let written = fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["x"], serde_json::json!([1.0, 2.0, 3.0]));
    assert_eq!(json["gain"], serde_json::json!(0.5));
}

#[test]
fn test_output_exists_no_force() {
    let temp = TempDir::new().unwrap();
    let input = sample(&temp);
    let output = temp.path().join("existing.json");
    fs::write(&output, "{}").unwrap();

    mat2json()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    mat2json()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--force")
        .arg("-q")
        .assert()
        .success();
}

#[cfg(not(feature = "hdf5"))]
#[test]
fn test_v73_needs_hdf5_feature() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("v73.mat");
    let mut bytes = vec![b' '; 128];
    bytes[124..126].copy_from_slice(&0x0200u16.to_le_bytes());
    bytes[126..128].copy_from_slice(b"IM");
    fs::write(&input, bytes).unwrap();

    mat2json()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--features hdf5"));
}
