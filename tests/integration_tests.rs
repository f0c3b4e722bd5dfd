use std::fs;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

fn cligraph() -> Command {
    Command::cargo_bin("cligraph").unwrap()
}

fn data_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_help_works() {
    cligraph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("help"));
}

#[test]
fn test_no_subcommand_fails() {
    cligraph()
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a subcommand"));
}

#[test]
fn test_one_subcommand_help() {
    cligraph()
        .arg("bar")
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("cat-field"));
}

#[test]
fn test_hist() {
    cligraph()
        .arg("hist")
        .write_stdin("1\n2\n3\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Samples = 4; Min = 1.000; Max = 4.000",
        ));
}

#[test]
fn test_hist_filter_and_separator() {
    cligraph()
        .args(&["hist", "--filter", "^v", "--separator", ",", "-f", "2"])
        .write_stdin("v,1\nx,foo\nv,3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Samples = 2;"));
}

#[test]
fn test_hist_unified_bins() {
    let first = data_file("0\n2\n");
    let second = data_file("4\n");
    cligraph()
        .args(&["hist", "-u", "-b", "2", "-p", "0"])
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[0 .. 2] [1] ∎\n"))
        .stdout(predicate::str::contains("[0 .. 2] [0] \n"))
        .stdout(predicate::str::contains("Samples = 1;"));
}

#[test]
fn test_hist_configuration_errors() {
    cligraph()
        .args(&["hist", "-b", "3", "-z", "1"])
        .assert()
        .failure();
    cligraph()
        .args(&["hist", "--quiet"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiet mode"));
    cligraph()
        .args(&["hist", "-f", "1-2-3"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed column range"));
    cligraph()
        .args(&["hist", "-s", "out", "--save-formats", "png"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported save format"));
    cligraph()
        .args(&["hist", "-b", "100000000000"])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Number of bins must be at most"));
}

#[test]
fn test_bad_data_is_fatal() {
    cligraph()
        .arg("hist")
        .write_stdin("1\nfoo\n3\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<stdin>:2"));
}

#[test]
fn test_blank_line_is_fatal() {
    cligraph()
        .arg("hist")
        .write_stdin("1\n\n3\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<stdin>:2"));
}

#[test]
fn test_missing_input() {
    cligraph()
        .args(&["hist", "/nonexistent/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read"));
}

#[test]
fn test_bar() {
    cligraph()
        .args(&["bar", "-t", "Fruit"])
        .write_stdin("apples 3\nfigs 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Fruit\n"))
        .stdout(predicate::str::contains("[apples] [3] ∎∎∎\n"))
        .stdout(predicate::str::contains("[figs  ] [1] ∎\n"));
}

#[test]
fn test_bar_logscale() {
    cligraph()
        .args(&["bar", "--logscale"])
        .write_stdin("many 999\nfew 9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logarithmic scale"))
        .stdout(predicate::str::contains("[many] [999] ∎"));
    cligraph()
        .args(&["hist", "--logscale"])
        .write_stdin("1\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logarithmic scale"));
}

#[test]
fn test_bar_error_columns() {
    cligraph()
        .args(&["bar", "-f", "2,3", "-e", "4"])
        .write_stdin("apples 3 1 0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must match"));
}

#[test]
fn test_line() {
    cligraph()
        .args(&["line", "-H", "3", "-w", "20", "-p", "0"])
        .write_stdin("1 1\n2 2\n3 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[3] "))
        .stdout(predicate::str::contains("[1] ●"))
        .stdout(predicate::str::contains("x range: 1 .. 3"));
}

#[test]
fn test_scatter_takes_one_input() {
    cligraph()
        .args(&["scatter", "a.txt", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 1, got 2"));
    cligraph()
        .args(&["scatter", "-m", "x", "-p", "0"])
        .write_stdin("1 2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("x"));
}

#[test]
fn test_save() {
    let dir = TempDir::new().unwrap();
    let basename = dir.path().join("chart");
    cligraph()
        .args(&["--color", "yes", "hist", "-q", "--save-formats", "txt,ansi", "-s"])
        .arg(&basename)
        .write_stdin("1\n2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let txt = fs::read_to_string(dir.path().join("chart.txt")).unwrap();
    assert!(txt.contains("Samples = 3;"));
    assert!(!txt.contains('\u{1b}'));
    let ansi = fs::read_to_string(dir.path().join("chart.ansi")).unwrap();
    assert!(ansi.contains('\u{1b}'));
}
