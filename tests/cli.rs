use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// A command with an isolated HOME, no credentials and an unroutable
/// GitHub endpoint, so nothing here can reach the network.
#[allow(deprecated)]
fn technerd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("technerd").expect("binary");
    cmd.env("HOME", home.path())
        .env("TECHNERD_GITHUB_API", "http://127.0.0.1:9")
        .env_remove("GITHUB_TOKEN")
        .env_remove("API_KEY")
        .env_remove("SERPAPI_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_subcommand_prints_banner_and_help() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn blank_query_is_rejected_before_any_call() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .args(["search", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a search query."))
        .stderr(predicate::str::contains("All possible searches").not());
}

#[test]
fn missing_query_counts_as_blank() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a search query."));
}

#[test]
fn json_output_carries_the_message() {
    let home = TempDir::new().unwrap();
    let output = technerd(&home)
        .args(["--json", "search", ""])
        .output()
        .expect("command run");
    assert!(!output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["message"], "Please enter a search query.");
    assert!(body["current_repository"].is_null());
    assert_eq!(body["previous_repositories"], serde_json::json!([]));
}

#[test]
fn featured_needs_gemini_key() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .arg("featured")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("technerd"));
}

#[test]
fn session_ban_list_round_trip() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .arg("session")
        .write_stdin(":banned\n:ban rust\n:ban rust\n:banned\n:unban rust\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No labels banned yet."))
        .stdout(predicate::str::contains("Banned 'rust'"))
        .stdout(predicate::str::contains("Nothing to ban."))
        .stdout(predicate::str::contains("rust ✕"))
        .stdout(predicate::str::contains("Unbanned 'rust'"));
}

#[test]
fn session_survives_blank_query_and_ends_on_eof() {
    let home = TempDir::new().unwrap();
    technerd(&home)
        .arg("session")
        .write_stdin("\n:history\n:suggest\n:nope\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Please enter a search query."))
        .stdout(predicate::str::contains("No previous repositories."))
        .stdout(predicate::str::contains("No repository selected yet."))
        .stdout(predicate::str::contains("Unknown command ':nope'"));
}

#[test]
fn invalid_config_file_is_reported() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.json");
    fs::write(&config, "{ nope").unwrap();

    technerd(&home)
        .args(["featured", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading configuration"));
}
