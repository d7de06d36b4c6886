use std::process::Command;

fn hookctl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hookctl"))
}

#[test]
fn test_hookctl_version() {
    let output = hookctl().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_hookctl_help() {
    let output = hookctl().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run"));
    assert!(stdout.contains("trace"));
}

#[test]
fn test_run_with_default_pipeline() {
    let output = hookctl().args(["run", "--input", "  hello  "]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "hello"));
}

#[test]
fn test_init_then_run_and_trace() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.toml");

    let output = hookctl().arg("init").arg(&path).output().unwrap();
    assert!(output.status.success());
    assert!(path.exists());

    // A second init must not overwrite the file.
    let output = hookctl().arg("init").arg(&path).output().unwrap();
    assert!(!output.status.success());

    let output = hookctl()
        .arg("--config")
        .arg(&path)
        .args(["run", "--input", " shout "])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "SHOUT!"));

    let output = hookctl()
        .arg("--config")
        .arg(&path)
        .args(["trace", "--input", " shout "])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("actor:uppercase"));
    assert!(stdout.lines().any(|line| line == "SHOUT!"));
}

#[test]
fn test_rejected_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strict.toml");
    std::fs::write(
        &path,
        "[pipeline]\npre = [\"trim\", \"reject-empty\"]\nactor = \"echo\"\n",
    )
    .unwrap();

    let output = hookctl()
        .arg("--config")
        .arg(&path)
        .args(["run", "--input", "   "])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input is empty"));
}

#[test]
fn test_list_as_json() {
    let output = hookctl().args(["list", "--json"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"reject-empty\""));
}
