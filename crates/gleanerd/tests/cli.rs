//! Integration tests for the gleaner CLI.
//!
//! These run the real binary but never touch the network: the download
//! pass over an empty table directory is a complete offline run.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Helper to create a clean command instance
fn gleaner() -> Command { Command::cargo_bin("gleaner").unwrap() }

/// Writes a config file pointing both directories inside `dir`.
fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
  let config_path = dir.join("config.toml");
  let content = format!(
    "table_dir = {:?}\noutput_dir = {:?}\n",
    dir.join("tables"),
    dir.join("papers")
  );
  std::fs::write(&config_path, content).unwrap();
  config_path
}

#[test]
fn help_lists_both_modes() {
  gleaner()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("harvest").and(predicate::str::contains("download")));
}

#[test]
fn download_pass_with_no_tables_succeeds() {
  let dir = tempdir().unwrap();
  let config_path = write_config(dir.path());

  gleaner()
    .arg("download")
    .arg("--config")
    .arg(&config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("0 attempted"));
}

#[test]
fn download_pass_skips_a_malformed_table() {
  let dir = tempdir().unwrap();
  let config_path = write_config(dir.path());

  let tables = dir.path().join("tables");
  std::fs::create_dir_all(&tables).unwrap();
  std::fs::write(tables.join("broken.csv"), "").unwrap();

  gleaner()
    .arg("download")
    .arg("--config")
    .arg(&config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("0 attempted"));
}

#[test]
fn an_unreadable_config_fails_loudly() {
  let dir = tempdir().unwrap();
  let config_path = dir.path().join("config.toml");
  std::fs::write(&config_path, "start_year = \"not a year\"\n").unwrap();

  gleaner()
    .arg("download")
    .arg("--config")
    .arg(&config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load configuration"));
}
