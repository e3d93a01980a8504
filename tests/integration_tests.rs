//! Integration tests for the demodata CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd,
//! each against its own throwaway catalog database.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a demodata command
fn demodata() -> Command {
    Command::cargo_bin("demodata").unwrap()
}

/// Helper to create an installed catalog in a temp directory
fn setup_catalog() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("catalog.db");
    demodata()
        .args(["--db", db.to_str().unwrap(), "install"])
        .assert()
        .success();
    (tmp, db)
}

fn db_arg(db: &PathBuf) -> [&str; 2] {
    ["--db", db.to_str().unwrap()]
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    demodata()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo product data"));
}

#[test]
fn test_version_displays() {
    demodata()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("demodata"));
}

#[test]
fn test_unknown_command_fails() {
    demodata().arg("unknown-command").assert().failure();
}

#[test]
fn test_completions_generate() {
    demodata()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demodata"));
}

// ============================================================================
// Install / Uninstall
// ============================================================================

#[test]
fn test_install_creates_database() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("nested/dir/catalog.db");

    demodata()
        .args(db_arg(&db))
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog ready"));

    assert!(db.exists());
}

#[test]
fn test_install_twice_is_harmless() {
    let (_tmp, db) = setup_catalog();
    demodata()
        .args(db_arg(&db))
        .arg("install")
        .assert()
        .success();
}

#[test]
fn test_uninstall_reports_marker_removal() {
    let (_tmp, db) = setup_catalog();
    demodata()
        .args(db_arg(&db))
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom field removed"));
}

#[test]
fn test_uninstall_keep_user_data() {
    let (_tmp, db) = setup_catalog();
    demodata()
        .args(db_arg(&db))
        .args(["uninstall", "--keep-user-data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user data kept"));
}

// ============================================================================
// Demo import / removal
// ============================================================================

#[test]
fn test_import_demo_adds_bundled_products() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("products has been added"))
        .stdout(predicate::str::contains("Demo data imported successfully!"));
}

#[test]
fn test_import_demo_again_reports_nothing_to_add() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category"])
        .assert()
        .success();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to add"));
}

#[test]
fn test_import_demo_json_outcome() {
    let (_tmp, db) = setup_catalog();

    let output = demodata()
        .args(db_arg(&db))
        .args(["--format", "json", "import-demo", "--force"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON outcome");
    assert_eq!(outcome["success"], true);
    assert!(outcome["additional_info"]
        .as_str()
        .unwrap()
        .contains("products has been added"));
    assert!(outcome["imported"].as_array().unwrap().len() > 1);
}

#[test]
fn test_import_demo_from_file() {
    let (tmp, db) = setup_catalog();
    let csv = tmp.path().join("own-demo.csv");
    fs::write(
        &csv,
        "article_no;short_desc;ean;oem\nF-1;File product;4001;M-1\nF-2;Another;4002;M-2\n",
    )
    .unwrap();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category", "--file"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 products has been added"));
}

#[test]
fn test_import_demo_missing_file_fails() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category", "--file", "/no/such/file.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_import_demo_missing_header_column_fails() {
    let (tmp, db) = setup_catalog();
    let csv = tmp.path().join("broken.csv");
    fs::write(&csv, "article_no;short_desc;ean\nX-1;Thing;4001\n").unwrap();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category", "--file"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("oem"));
}

#[test]
fn test_import_demo_category_flags_conflict() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--category-id", "abc", "--no-category"])
        .assert()
        .failure();
}

#[test]
fn test_remove_demo_deletes_imported_products() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args(["import-demo", "--force", "--no-category"])
        .assert()
        .success();

    demodata()
        .args(db_arg(&db))
        .args(["remove-demo", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully deleted"));

    demodata()
        .args(db_arg(&db))
        .args(["remove-demo", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No demo products found"));
}

// ============================================================================
// Generic CSV import
// ============================================================================

#[test]
fn test_import_csv_with_column_indices() {
    let (tmp, db) = setup_catalog();
    let csv = tmp.path().join("products.csv");
    fs::write(
        &csv,
        "ignored header\n\
         \"P-1\";\"First product\";\"4001\";\"MPN-1\"\n\
         \"P-2\";\"Second product\";\"4002\";\"MPN-2\"\n\
         \"P-3\";\"Third product\";\"4003\";\"MPN-3\"\n",
    )
    .unwrap();

    demodata()
        .args(db_arg(&db))
        .args([
            "import-csv",
            "--number",
            "0",
            "--name",
            "1",
            "--ean",
            "2",
            "--mpn",
            "3",
            "--start",
            "2",
            "--file",
        ])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Products in file: 3"))
        .stdout(predicate::str::contains("Imported 3 product(s)"));
}

#[test]
fn test_import_csv_skips_already_imported() {
    let (tmp, db) = setup_catalog();
    let csv = tmp.path().join("products.csv");
    fs::write(&csv, "P-1;Widget\nP-2;Gadget\n").unwrap();

    demodata()
        .args(db_arg(&db))
        .args(["import-csv", "--number", "0", "--name", "1", "--file"])
        .arg(&csv)
        .assert()
        .success();

    // Everything already present: the second run finds nothing new
    demodata()
        .args(db_arg(&db))
        .args(["import-csv", "--number", "0", "--name", "1", "--file"])
        .arg(&csv)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Products not added yet: 0"));
}

#[test]
fn test_import_csv_missing_file_fails() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .args([
            "import-csv",
            "--number",
            "0",
            "--name",
            "1",
            "--file",
            "/no/such/products.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_import_csv_respects_line_range() {
    let (tmp, db) = setup_catalog();
    let csv = tmp.path().join("products.csv");
    fs::write(&csv, "R-1;one\nR-2;two\nR-3;three\nR-4;four\n").unwrap();

    demodata()
        .args(db_arg(&db))
        .args([
            "import-csv",
            "--number",
            "0",
            "--name",
            "1",
            "--start",
            "2",
            "--end",
            "3",
            "--file",
        ])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Products in file: 2"));
}

// ============================================================================
// Credentials
// ============================================================================

#[test]
fn test_credentials_seed_then_refuse_without_force() {
    let (_tmp, db) = setup_catalog();

    demodata()
        .args(db_arg(&db))
        .arg("credentials")
        .assert()
        .success()
        .stdout(predicate::str::contains("Credentials set"));

    demodata()
        .args(db_arg(&db))
        .arg("credentials")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    demodata()
        .args(db_arg(&db))
        .args(["credentials", "--force"])
        .assert()
        .success();
}
