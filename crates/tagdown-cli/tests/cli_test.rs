//! Integration tests for the tagdown CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tagdown"))
}

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("# Title\n\nContent\n");
}

#[test]
fn test_file_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    fs::write(&input_path, "<p>Test content</p>").unwrap();

    cli()
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout("Test content\n");
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<p>dash</p>")
        .assert()
        .success()
        .stdout("dash\n");
}

#[test]
fn test_input_option_takes_literal_html() {
    cli()
        .arg("-i")
        .arg("<ul><li>one</li></ul>")
        .assert()
        .success()
        .stdout("- one\n");
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.md");

    cli()
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .write_stdin("<p>Output test</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown written to"));

    let output = fs::read_to_string(&output_path).unwrap();
    assert_eq!(output, "Output test\n");
}

#[test]
fn test_replace_overwrites_without_asking() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.md");
    fs::write(&output_path, "old").unwrap();

    cli()
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .arg("-r")
        .write_stdin("<p>new</p>")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "new\n");
}

#[test]
fn test_declined_overwrite_keeps_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.md");
    fs::write(&output_path, "old").unwrap();

    cli()
        .arg("-i")
        .arg("<p>new</p>")
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown not written."));

    assert_eq!(fs::read_to_string(&output_path).unwrap(), "old");
}

#[test]
fn test_print_alongside_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.md");

    cli()
        .arg("-p")
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .arg("-r")
        .write_stdin("<p>both</p>")
        .assert()
        .success()
        .stdout(predicate::str::contains("both\n"));
}

#[test]
fn test_nonexistent_input_file() {
    cli()
        .arg("/nonexistent/input.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn test_bullet_option() {
    cli()
        .arg("--bullet")
        .arg("*")
        .write_stdin("<ul><li>List</li></ul>")
        .assert()
        .success()
        .stdout("* List\n");
}

#[test]
fn test_invalid_bullet_is_rejected() {
    cli()
        .arg("--bullet")
        .arg("x")
        .write_stdin("<ul><li>List</li></ul>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bullet"));
}

#[test]
fn test_ordered_suffix_option() {
    cli()
        .arg("--ordered-suffix")
        .arg(")")
        .write_stdin("<ol><li>List</li></ol>")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) List\n"));
}

#[test]
fn test_skip_title() {
    cli()
        .arg("--skip-title")
        .write_stdin("<title>Site</title><p>body</p>")
        .assert()
        .success()
        .stdout("body\n");
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML to Markdown"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagdown"));
}

#[test]
fn test_completion_script() {
    cli()
        .arg("--generate-completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagdown"));
}
