/// CRLF documents must be scanned with the same line numbers as LF ones and
/// repaired without converting any line endings.
use assert_cmd::Command;
use mdconform_lib::{ViolationKind, repair, scan};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_scan_crlf_matches_lf() {
    let lf = "Intro\n* a\n\n```\nls\n```\nText\n| t |\n";
    let crlf = lf.replace('\n', "\r\n");

    let lf_result: Vec<(usize, ViolationKind)> = scan(lf).into_iter().map(|v| (v.line, v.kind)).collect();
    let crlf_result: Vec<(usize, ViolationKind)> = scan(&crlf).into_iter().map(|v| (v.line, v.kind)).collect();
    assert_eq!(lf_result, crlf_result);
    assert!(!lf_result.is_empty());
}

#[test]
fn test_repair_keeps_crlf() {
    let content = "# Title\r\n\r\n```\r\n{\"a\": 1}\r\n```\r\n";
    let result = repair(content);
    assert_eq!(result.content, "# Title\r\n\r\n```json\r\n{\"a\": 1}\r\n```\r\n");
    assert_eq!(result.fixes[0].original_opening_line, "```");
}

#[test]
fn test_repair_mixed_endings_untouched_outside_target() {
    let content = "a\r\nb\n```\r\nkey: value\n```\r\nc";
    let result = repair(content);
    assert_eq!(result.content, "a\r\nb\n```yaml\r\nkey: value\n```\r\nc");
}

#[test]
fn test_fix_command_preserves_crlf() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(&test_file, "Steps\r\n\r\n```\r\ngit status\r\n```\r\n").unwrap();

    Command::cargo_bin("mdconform")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["fix", "test.md"])
        .assert()
        .code(0);

    let result = fs::read_to_string(&test_file).unwrap();
    assert_eq!(result, "Steps\r\n\r\n```bash\r\ngit status\r\n```\r\n");
}
