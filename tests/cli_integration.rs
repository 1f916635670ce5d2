//! Integration tests for the `shop` CLI.
//!
//! Each test runs `shop replay` as a subprocess in a temp directory, feeding
//! an intent script on stdin or from a file, and checks stdout/stderr.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

fn shop_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shop"))
}

/// Run `shop` with the given args and stdin, returning (stdout, stderr, success).
fn run_shop(dir: &Path, args: &[&str], stdin: &str) -> (String, String, bool) {
    let mut child = Command::new(shop_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("SHOP_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run shop");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `shop` expecting success, return stdout.
fn run_shop_ok(dir: &Path, args: &[&str], stdin: &str) -> String {
    let (stdout, stderr, success) = run_shop(dir, args, stdin);
    if !success {
        panic!(
            "shop {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

#[test]
fn test_replay_add_and_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_shop_ok(tmp.path(), &["replay"], "add Milk 2\n");
    assert_eq!(out, "  1  Milk  Qty: 2\n");
}

#[test]
fn test_replay_sort_by_quantity() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_shop_ok(
        tmp.path(),
        &["replay"],
        "add Apples 3\nadd Bread 1\nsort quantity\n",
    );
    assert_eq!(out, "  2  Bread   Qty: 1\n  1  Apples  Qty: 3\n");
}

#[test]
fn test_replay_edit_scenario() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_shop_ok(
        tmp.path(),
        &["replay"],
        "add X 1\nedit 1\nlist\nsave 1 Y 5\n",
    );
    assert_eq!(out, "  1  X  Qty: 1  [editing]\n\n  1  Y  Qty: 5\n");
}

#[test]
fn test_replay_from_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let script = tmp.path().join("week.txt");
    fs::write(&script, "# groceries\nadd Olive oil 1\nadd Eggs 12\ndelete 1\n").unwrap();
    let out = run_shop_ok(tmp.path(), &["replay", "week.txt"], "");
    assert_eq!(out, "  2  Eggs  Qty: 12\n");
}

#[test]
fn test_replay_ids_not_reused() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_shop_ok(
        tmp.path(),
        &["replay"],
        "add A 1\nadd B 1\nadd C 1\ndelete 3\nadd D 1\n",
    );
    assert_eq!(out, "  1  A  Qty: 1\n  2  B  Qty: 1\n  4  D  Qty: 1\n");
}

#[test]
fn test_replay_validation_warning() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, success) = run_shop(tmp.path(), &["replay"], "add Milk lots\n");
    assert!(success);
    assert_eq!(stdout, "(no items)\n");
    assert!(stderr.contains("warning: line 1: quantity must be a whole number greater than zero"));
}

#[test]
fn test_replay_parse_error_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, success) = run_shop(tmp.path(), &["replay"], "add Milk 2\nbuy Eggs 3\n");
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: line 2: unknown command 'buy'"));
}

#[test]
fn test_replay_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_shop_ok(tmp.path(), &["replay", "--json"], "add Milk 2\nadd Tea 0\n");
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed["items"],
        serde_json::json!([{ "id": 1, "name": "Milk", "quantity": 2, "is_editing": false }])
    );
    assert_eq!(parsed["warnings"][0]["line"], 2);
}

#[test]
fn test_strict_flag_rejects_bad_edit_quantity() {
    let tmp = tempfile::TempDir::new().unwrap();
    let script = "add Tea 2\nedit 1\nsave 1 Green tea lots\n";

    let lenient = run_shop_ok(tmp.path(), &["replay"], script);
    assert_eq!(lenient, "  1  Green tea  Qty: 1\n");

    let (stdout, stderr, success) = run_shop(tmp.path(), &["replay", "--strict"], script);
    assert!(success);
    assert_eq!(stdout, "  1  Tea  Qty: 2\n");
    assert!(stderr.contains("warning: line 3"));
}

#[test]
fn test_config_file_sets_default_sort() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("shop.toml"),
        "[list]\ndefault_sort = \"quantity\"\n",
    )
    .unwrap();
    let script = "add Apples 3\nadd Bread 1\n";

    let out = run_shop_ok(tmp.path(), &["replay"], script);
    assert_eq!(out, "  2  Bread   Qty: 1\n  1  Apples  Qty: 3\n");

    // --sort wins over the file
    let out = run_shop_ok(tmp.path(), &["replay", "--sort", "name"], script);
    assert_eq!(out, "  1  Apples  Qty: 3\n  2  Bread   Qty: 1\n");
}

#[test]
fn test_bad_config_is_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("shop.toml"), "[list]\nedit_quantity = 3\n").unwrap();
    let (_, stderr, success) = run_shop(tmp.path(), &["replay"], "");
    assert!(!success);
    assert!(stderr.contains("invalid config"));
}
