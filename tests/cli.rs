use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sourceurl() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sourceurl"))
}

fn root_flag(root: &Path) -> String {
    format!("--rootDir={}", root.display())
}

#[test]
fn annotates_js_with_relative_marker() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/app.js"), "console.log(1);");

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=node_modules")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("src/app.js")).unwrap(),
        "//# sourceURL=/src/app.js\nconsole.log(1);"
    );
}

#[test]
fn annotates_css_with_block_comment() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("style/main.css"), "body{}");

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=css")
        .arg("--ignoredDirs=")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("style/main.css")).unwrap(),
        "/*# sourceURL=/style/main.css */\nbody{}"
    );
}

#[test]
fn accepts_space_separated_flag_values() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("index.html"), "<p></p>");

    sourceurl()
        .arg("--rootDir")
        .arg(temp.path())
        .arg("--fileTypes")
        .arg("html")
        .arg("--ignoredDirs")
        .arg("assets")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("index.html")).unwrap(),
        "<!--# sourceURL=/index.html -->\n<p></p>"
    );
}

#[test]
fn second_run_reports_already_annotated() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "a();");

    for expected in ["annotated", "already_annotated"] {
        let assert = sourceurl()
            .arg(root_flag(temp.path()))
            .arg("--fileTypes=js")
            .arg("--ignoredDirs=")
            .assert()
            .success();
        let items = parse_jsonl(&assert.get_output().stdout);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["status"], expected);
    }

    assert_eq!(
        fs::read_to_string(temp.path().join("a.js")).unwrap(),
        "//# sourceURL=/a.js\na();"
    );
}

#[test]
fn ignored_directories_are_skipped_at_any_depth() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("play/a.js"), "a");
    write_file(&temp.path().join("src/deep/play/b.js"), "b");
    write_file(&temp.path().join("src/c.js"), "c");

    let assert = sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=play")
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    let paths: Vec<_> = items.iter().map(|v| v["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["src/c.js"]);

    assert_eq!(fs::read_to_string(temp.path().join("play/a.js")).unwrap(), "a");
    assert_eq!(
        fs::read_to_string(temp.path().join("src/deep/play/b.js")).unwrap(),
        "b"
    );
}

#[test]
fn minified_and_unselected_files_are_untouched() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("foo.min.js"), "min");
    write_file(&temp.path().join("style.css"), "body{}");

    let assert = sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=")
        .assert()
        .success();

    assert!(parse_jsonl(&assert.get_output().stdout).is_empty());
    assert_eq!(fs::read_to_string(temp.path().join("foo.min.js")).unwrap(), "min");
    assert_eq!(fs::read_to_string(temp.path().join("style.css")).unwrap(), "body{}");
}

#[test]
fn empty_file_type_selection_is_a_noop() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "a");

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=")
        .arg("--ignoredDirs=")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No file types selected"));

    assert_eq!(fs::read_to_string(temp.path().join("a.js")).unwrap(), "a");
}

#[test]
fn unknown_file_type_is_reported_separately() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("main.ts"), "let a = 1;");

    let assert = sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=ts")
        .arg("--ignoredDirs=")
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], "unknown_type");
    assert_eq!(fs::read_to_string(temp.path().join("main.ts")).unwrap(), "let a = 1;");
}

#[test]
fn strict_mode_replaces_stale_marker() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("moved/app.js"),
        "//# sourceURL=/app.js\nrun();",
    );

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=")
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"updated\""));

    assert_eq!(
        fs::read_to_string(temp.path().join("moved/app.js")).unwrap(),
        "//# sourceURL=/moved/app.js\nrun();"
    );
}

#[test]
fn raw_format_prints_one_line_per_file() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "a");
    write_file(&temp.path().join("b.js"), "//# sourceURL=/b.js\nb");

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=")
        .arg("--format")
        .arg("raw")
        .arg("--no-color")
        .assert()
        .success()
        .stdout("Added sourceURL to file: a.js\nFile already has a sourceURL: b.js\n");
}

#[test]
fn missing_root_fails() {
    let temp = tempdir().unwrap();

    sourceurl()
        .arg(root_flag(&temp.path().join("missing")))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to annotate"));
}

#[test]
fn incomplete_flags_without_terminal_fail_to_prompt() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "a");

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .write_stdin("")
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(temp.path().join("a.js")).unwrap(), "a");
}

#[test]
fn ignored_dir_entries_are_trimmed() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/assets/icons.js"), "i");
    write_file(&temp.path().join("src/lib/play/demo.js"), "d");
    write_file(&temp.path().join("src/lib/util.js"), "u");

    let assert = sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=js")
        .arg("--ignoredDirs= play , assets")
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    let paths: Vec<_> = items.iter().map(|v| v["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["src/lib/util.js"]);

    assert_eq!(fs::read_to_string(temp.path().join("src/assets/icons.js")).unwrap(), "i");
    assert_eq!(
        fs::read_to_string(temp.path().join("src/lib/play/demo.js")).unwrap(),
        "d"
    );
}

#[test]
fn empty_root_flag_falls_back_to_prompt() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.js"), "a");

    sourceurl()
        .current_dir(temp.path())
        .arg("--rootDir=")
        .arg("--fileTypes=js")
        .arg("--ignoredDirs=")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("a value is required").not());

    assert_eq!(fs::read_to_string(temp.path().join("a.js")).unwrap(), "a");
}

#[test]
fn strict_mode_keeps_code_sharing_the_marker_line() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("new/site.css"),
        "/*# sourceURL=/old/site.css */ body{color:red}",
    );

    sourceurl()
        .arg(root_flag(temp.path()))
        .arg("--fileTypes=css")
        .arg("--ignoredDirs=")
        .arg("--strict")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("new/site.css")).unwrap(),
        "/*# sourceURL=/new/site.css */ body{color:red}"
    );
}
