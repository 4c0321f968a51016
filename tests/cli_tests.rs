mod common;
use common::{acd, init_db, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::*;
use predicates::str::contains;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");
    init_db(&db_path);

    assert!(Path::new(&db_path).exists());

    let conn = Connection::open(&db_path).unwrap();
    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(tables.contains(&"items".to_string()));
    assert!(tables.contains(&"log".to_string()));
}

#[test]
fn test_add_and_list() {
    let db_path = setup_test_db("add_and_list");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Fire extinguisher"))
        .stdout(contains("Safety helmet"))
        .stdout(contains("2 item(s)"));
}

#[test]
fn test_add_defaults_to_today_and_not_passed() {
    let db_path = setup_test_db("add_defaults");
    init_db(&db_path);

    acd()
        .args(["--db", &db_path, "add", "--title", "Emergency exit"])
        .assert()
        .success()
        .stdout(contains("Item #1 added"));

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let conn = Connection::open(&db_path).unwrap();
    let (date, passed): (String, i64) = conn
        .query_row("SELECT date, passed FROM items WHERE id = 1", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(date, today);
    assert_eq!(passed, 0);
}

#[test]
fn test_add_rejects_bad_date_and_check() {
    let db_path = setup_test_db("add_rejects_bad_input");
    init_db(&db_path);

    acd()
        .args(["--db", &db_path, "add", "--title", "X", "--date", "15/01/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    acd()
        .args(["--db", &db_path, "add", "--title", "X", "--check", "maybe"])
        .assert()
        .failure()
        .stderr(contains("Invalid check value"));

    acd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No items found"));
}

#[test]
fn test_list_filters_are_exact_and_combined() {
    let db_path = setup_test_db("list_filters");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "list", "--area", "Warehouse"])
        .assert()
        .success()
        .stdout(contains("Fire extinguisher"))
        .stdout(contains("Safety helmet").not());

    acd()
        .args([
            "--db",
            &db_path,
            "list",
            "--area",
            "Warehouse",
            "--assigned-to",
            "Sari",
        ])
        .assert()
        .success()
        .stdout(contains("No items found"));

    acd()
        .args(["--db", &db_path, "list", "--area", "warehouse"])
        .assert()
        .success()
        .stdout(contains("No items found"));
}

#[test]
fn test_list_filter_values() {
    let db_path = setup_test_db("list_filter_values");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "list", "--filter-values"])
        .assert()
        .success()
        .stdout(contains("- Site B"))
        .stdout(contains("- Warehouse"))
        .stdout(contains("- Sari"));
}

#[test]
fn test_search_is_case_insensitive() {
    let db_path = setup_test_db("search_case");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "search", "HELM"])
        .assert()
        .success()
        .stdout(contains("Safety helmet"))
        .stdout(contains("Fire extinguisher").not())
        .stdout(contains("1 item(s)"));
}

#[test]
fn test_edit_updates_only_given_fields() {
    let db_path = setup_test_db("edit_partial");
    init_db_with_data(&db_path);

    acd()
        .args([
            "--db",
            &db_path,
            "edit",
            "2",
            "--check",
            "Y",
            "--recommendation",
            "Done",
        ])
        .assert()
        .success()
        .stdout(contains("Item #2 updated"));

    let conn = Connection::open(&db_path).unwrap();
    let (title, passed, rec): (String, i64, String) = conn
        .query_row(
            "SELECT title, passed, recommendation FROM items WHERE id = 2",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(title, "Safety helmet");
    assert_eq!(passed, 1);
    assert_eq!(rec, "Done");
}

#[test]
fn test_edit_unknown_id_fails() {
    let db_path = setup_test_db("edit_unknown");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "edit", "99", "--title", "Nope"])
        .assert()
        .failure()
        .stderr(contains("Record not found: 99"));
}

#[test]
fn test_del_with_confirmation() {
    let db_path = setup_test_db("del_confirm");
    init_db_with_data(&db_path);

    // declined
    acd()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    acd()
        .args(["--db", &db_path, "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Item #1 has been deleted"));

    acd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Fire extinguisher").not())
        .stdout(contains("Safety helmet"));
}

#[test]
fn test_del_unknown_id_fails() {
    let db_path = setup_test_db("del_unknown");
    init_db(&db_path);

    acd()
        .args(["--db", &db_path, "del", "5", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Record not found: 5"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "del", "2", "--yes"])
        .assert()
        .success();

    acd()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("Added 'Fire extinguisher'"))
        .stdout(contains("Deleted 'Safety helmet'"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    acd()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total items:"))
        .stdout(contains("2024-01-15"))
        .stdout(contains("2024-02-03"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_data(&db_path);
    let out = temp_out("backup_zip", "sqlite");
    let zip_path = Path::new(&out).with_extension("zip");
    fs::remove_file(&zip_path).ok();

    acd()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(zip_path.exists());
    assert!(!Path::new(&out).exists());

    let archive = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
}

#[test]
fn test_legacy_schema_is_upgraded() {
    let db_path = setup_test_db("legacy_schema");
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                judul TEXT, area TEXT, assignedTo TEXT, tanggal TEXT,
                keterangan TEXT, ok INTEGER, rekomendasi TEXT
            );
            INSERT INTO items (judul, area, assignedTo, tanggal, keterangan, ok, rekomendasi)
            VALUES ('Tangga darurat', 'Lantai 2', 'Rina', '2023-11-20', NULL, 0, 'Pasang lampu');
            "#,
        )
        .unwrap();
    }

    acd()
        .args(["--db", &db_path, "list", "--details"])
        .assert()
        .success()
        .stdout(contains("Tangga darurat"))
        .stdout(contains("Pasang lampu"));

    acd()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"));
}

#[test]
fn test_relative_db_name_is_shared_by_init_and_other_commands() {
    let root = std::env::temp_dir().join("auditcheck_relative_db");
    fs::remove_dir_all(&root).ok();
    let home = root.join("home");
    let cwd = root.join("cwd");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&cwd).unwrap();

    let run = |args: &[&str]| {
        let mut cmd = acd();
        cmd.env("HOME", &home).current_dir(&cwd).args(args);
        cmd
    };

    run(&["--db", "checks.sqlite", "--test", "init"])
        .assert()
        .success();
    run(&[
        "--db",
        "checks.sqlite",
        "add",
        "--title",
        "Fire extinguisher",
        "--check",
        "Y",
    ])
    .assert()
    .success();
    run(&["--db", "checks.sqlite", "list"])
        .assert()
        .success()
        .stdout(contains("Fire extinguisher"));

    let expected = home.join(".auditcheck").join("checks.sqlite");
    assert!(!cwd.join("checks.sqlite").exists());

    let conn = Connection::open(&expected).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);

    fs::remove_dir_all(&root).ok();
}
