use std::fs;
use std::process::Command;

fn linekit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_linekit"))
}

#[test]
fn test_cli_help() {
    let output = linekit().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("lines"));
    assert!(stdout.contains("json"));
}

#[test]
fn test_cli_dir_exists_missing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = linekit()
        .args(["dir", "--exists"])
        .arg(dir.path().join("missing"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not found"));
}

#[test]
fn test_cli_dir_touch_creates() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("a").join("b");
    let output = linekit()
        .args(["dir", "--touch"])
        .arg(&target)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(target.is_dir());
}

#[test]
fn test_cli_lines_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "line 1\n\n  line 2\nline 3 ").unwrap();

    let output = linekit()
        .args(["lines", "--skip-empty"])
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "line 1\nline 2\nline 3\n");
}

#[test]
fn test_cli_json_rewrite_with_unicode() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let out = dir.path().join("out.jsonl");
    fs::write(&input, "{\"baz\": \"\\u4e2d\"}\n\nbroken\n{}\n").unwrap();

    let output = linekit()
        .args(["json", "--ignore-errors", "--skip-empty", "--unicode"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&out).unwrap(), "{\"baz\":\"中\"}\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("malformed JSON line"));
}

#[test]
fn test_cli_lines_progress_reaches_captured_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    fs::write(&input, "a\nb\nc\n").unwrap();

    let output = linekit()
        .args(["lines", "--progress"])
        .arg(&input)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "a\nb\nc\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[00:00"), "stderr was {:?}", stderr);
}
