#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn acd() -> Command {
    cargo_bin_cmd!("auditcheck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_auditcheck.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create the schema without touching the user's config file
pub fn init_db(db_path: &str) {
    acd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    acd()
        .args([
            "--db",
            db_path,
            "add",
            "--title",
            "Fire extinguisher",
            "--area",
            "Warehouse",
            "--assigned-to",
            "Budi",
            "--date",
            "2024-01-15",
            "--finding",
            "OK",
            "--check",
            "Y",
        ])
        .assert()
        .success();

    acd()
        .args([
            "--db",
            db_path,
            "add",
            "--title",
            "Safety helmet",
            "--area",
            "Site B",
            "--assigned-to",
            "Sari",
            "--date",
            "2024-02-03",
            "--finding",
            "Wajib pakai helm\nTwo workers without one",
            "--check",
            "T",
            "--recommendation",
            "Briefing before each shift",
        ])
        .assert()
        .success();
}
