//! Integration tests for the `qb` CLI.
//!
//! Each test creates a temp data directory, runs `qb -C <dir>` as a
//! subprocess, and verifies stdout and/or the stored slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `qb` binary.
fn qb_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_qb"))
}

/// Run `qb` against the given data directory, returning (stdout, stderr, success).
fn run_qb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(qb_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run qb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `qb` expecting success, return stdout.
fn run_qb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_qb(dir, args);
    if !success {
        panic!(
            "qb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Add a task and return its id.
fn add(dir: &Path, name: &str) -> String {
    run_qb_ok(dir, &["add", name]).trim().to_string()
}

fn stored(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("tasks.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_qb_ok(tmp.path(), &["list"]), "no tasks\n");
    // Loading alone never writes
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn test_add_then_list_in_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "Learn Rust");
    let b = add(tmp.path(), "Write tests");
    assert!(a.parse::<u64>().unwrap() < b.parse::<u64>().unwrap());

    let out = run_qb_ok(tmp.path(), &["list"]);
    assert_eq!(
        out,
        format!("{}  Learn Rust  xp 0\n{}  Write tests  xp 0\n", a, b)
    );
}

#[test]
fn test_add_blank_name_is_ignored() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_qb_ok(tmp.path(), &["add", "   "]), "");
    assert_eq!(run_qb_ok(tmp.path(), &["list"]), "no tasks\n");
}

#[test]
fn test_add_keeps_name_verbatim() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "  padded  ");
    assert_eq!(stored(tmp.path())[0]["name"], "  padded  ");
}

#[test]
fn test_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "Learn Rust");
    run_qb_ok(tmp.path(), &["note", &id, "chapter 4\nnext: traits"]);
    run_qb_ok(tmp.path(), &["res", "add", &id, "https://doc.rust-lang.org"]);

    let out = run_qb_ok(tmp.path(), &["show", &id]);
    assert_eq!(
        out,
        format!(
            "{}  Learn Rust\n\
             xp: 0 [....................] 0%\n\
             last worked on:\n  chapter 4\n  next: traits\n\
             resources:\n  - https://doc.rust-lang.org\n",
            id
        )
    );
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "Learn Rust");

    let out = run_qb_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"].to_string(), id);
    assert_eq!(arr[0]["name"], "Learn Rust");
    assert_eq!(arr[0]["xp"], 0);
    assert_eq!(arr[0]["progress"], 0);
    assert_eq!(arr[0]["lastWork"], "");
    assert_eq!(arr[0]["resources"], serde_json::json!([]));
}

#[test]
fn test_add_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_qb_ok(tmp.path(), &["--json", "add", "x"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed["id"].is_u64());

    let out = run_qb_ok(tmp.path(), &["--json", "add", ""]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed["id"].is_null());
}

#[test]
fn test_pick_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_qb_ok(tmp.path(), &["pick"]), "no tasks\n");
    assert_eq!(run_qb_ok(tmp.path(), &["pick", "--json"]), "null\n");
}

#[test]
fn test_pick_returns_a_stored_task() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "a");
    let b = add(tmp.path(), "b");

    let out = run_qb_ok(tmp.path(), &["pick", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let picked = parsed["id"].to_string();
    assert!(picked == a || picked == b);
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_note_replaces_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "a");
    assert_eq!(
        run_qb_ok(tmp.path(), &["note", &id, "first"]),
        format!("{} note updated\n", id)
    );
    run_qb_ok(tmp.path(), &["note", &id, "second"]);
    assert_eq!(stored(tmp.path())[0]["lastWork"], "second");
}

#[test]
fn test_xp_wraps_progress() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "a");
    let out = run_qb_ok(tmp.path(), &["xp", &id, "-n", "11"]);
    assert_eq!(out, format!("{} xp 110 (10%)\n", id));
    assert_eq!(stored(tmp.path())[0]["xp"], 110);

    let out = run_qb_ok(tmp.path(), &["xp", &id]);
    assert_eq!(out, format!("{} xp 120 (20%)\n", id));
}

#[test]
fn test_xp_large_count_is_one_write() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "a");
    let out = run_qb_ok(tmp.path(), &["xp", &id, "-n", "4000000000"]);
    assert_eq!(out, format!("{} xp 40000000000 (0%)\n", id));
}

#[test]
fn test_resources_add_and_remove_all_copies() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "a");
    for url in ["http://x", "http://y", "http://x"] {
        assert_eq!(
            run_qb_ok(tmp.path(), &["res", "add", &id, url]),
            format!("{} resource added\n", id)
        );
    }
    assert_eq!(
        stored(tmp.path())[0]["resources"],
        serde_json::json!(["http://x", "http://y", "http://x"])
    );

    assert_eq!(
        run_qb_ok(tmp.path(), &["res", "rm", &id, "http://x"]),
        format!("{} resource removed\n", id)
    );
    assert_eq!(
        stored(tmp.path())[0]["resources"],
        serde_json::json!(["http://y"])
    );
}

#[test]
fn test_rm() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), "a");
    let b = add(tmp.path(), "b");
    assert_eq!(run_qb_ok(tmp.path(), &["rm", &a]), format!("{} deleted\n", a));

    let out = run_qb_ok(tmp.path(), &["list"]);
    assert_eq!(out, format!("{}  b  xp 0\n", b));
}

#[test]
fn test_unknown_id_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), "a");
    let before = fs::read_to_string(tmp.path().join("tasks.json")).unwrap();

    for args in [
        vec!["show", "1"],
        vec!["rm", "1"],
        vec!["note", "1", "x"],
        vec!["xp", "1"],
        vec!["res", "add", "1", "http://x"],
    ] {
        let (_, stderr, success) = run_qb(tmp.path(), &args);
        assert!(!success, "qb {:?} should fail", args);
        assert!(stderr.contains("error: task not found: 1"), "stderr: {}", stderr);
    }

    let after = fs::read_to_string(tmp.path().join("tasks.json")).unwrap();
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Storage and config
// ---------------------------------------------------------------------------

#[test]
fn test_slot_is_pretty_camel_case_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), "a");
    let text = fs::read_to_string(tmp.path().join("tasks.json")).unwrap();
    assert!(text.starts_with("[\n"));
    assert!(text.contains(&format!("\"id\": {}", id)));
    assert!(text.contains("\"lastWork\": \"\""));
}

#[test]
fn test_malformed_slot_loads_empty_and_is_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "not json {").unwrap();

    assert_eq!(run_qb_ok(tmp.path(), &["list"]), "no tasks\n");
    let bak = fs::read_to_string(tmp.path().join("tasks.json.bak")).unwrap();
    assert_eq!(bak, "not json {");

    // The next write replaces the malformed slot
    add(tmp.path(), "fresh");
    assert_eq!(stored(tmp.path())[0]["name"], "fresh");
}

#[test]
fn test_tolerates_records_missing_fields() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("tasks.json"),
        r#"[{"id": 5, "name": "old"}]"#,
    )
    .unwrap();

    assert_eq!(run_qb_ok(tmp.path(), &["list"]), "5  old  xp 0\n");
    let out = run_qb_ok(tmp.path(), &["xp", "5"]);
    assert_eq!(out, "5 xp 10 (10%)\n");
}

#[test]
fn test_config_storage_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[storage]\nkey = \"quests\"\n",
    )
    .unwrap();

    add(tmp.path(), "a");
    assert!(tmp.path().join("quests.json").exists());
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn test_bad_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[storage\n").unwrap();
    let (_, stderr, success) = run_qb(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"), "stderr: {}", stderr);
}

#[test]
fn test_non_utf8_slot_loads_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), b"[\xff\xfe garbage").unwrap();

    assert_eq!(run_qb_ok(tmp.path(), &["list"]), "no tasks\n");
    let bak = fs::read(tmp.path().join("tasks.json.bak")).unwrap();
    assert_eq!(bak, b"[\xff\xfe garbage");
}

#[test]
fn test_storage_key_cannot_leave_data_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("config.toml"), "[storage]\nkey = \"../x\"\n").unwrap();

    let (_, stderr, success) = run_qb(&data, &["add", "a"]);
    assert!(!success);
    assert!(stderr.contains("invalid storage key"), "stderr: {}", stderr);
    assert!(!tmp.path().join("x.json").exists());
}
