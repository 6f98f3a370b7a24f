use std::io::Write;
use std::process::Command;

fn raghub() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_raghub"));
    cmd.env("DOTENV_PATH", "/nonexistent/.env")
        .env_remove("RAGHUB_REPOS_FILE")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn lists_demo_working_set() {
    let output = raghub().args(["repos", "list"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("IyedBecheikh/raghub"));
    assert!(lines[2].contains("Indexing..."));
    assert!(lines[2].contains("(private)"));
}

#[test]
fn index_waits_and_prints_both_transitions() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"id": 42, "name": "solo", "fullName": "me/solo"}}]"#).unwrap();

    let output = raghub()
        .arg("--repos-file")
        .arg(file.path())
        .args(["--index-delay-ms", "20", "repos", "index", "--id", "42"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["42 indexing", "42 indexed"]);
}

#[test]
fn status_of_unknown_repository_fails() {
    let output = raghub().args(["repos", "status", "--id", "999"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown repository: 999"));
}

#[test]
fn list_filters_by_status() {
    let output = raghub()
        .args(["repos", "list", "--status", "not_indexed"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("awesome-project"));
    assert!(lines[1].contains("data-science-toolkit"));
}
