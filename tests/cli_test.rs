#![cfg(unix)]

use assert_cmd::Command;
use indoc::formatdoc;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod common;

use common::create_zip;

fn jsdce() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jsdce"));
    cmd.env_remove("JSDCE_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Project whose analyzer is a shell script recording its arguments
fn write_project(root: &Path, enabled: bool, script: &str) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("libs")).unwrap();
    fs::write(root.join("src/app.js"), "// app").unwrap();
    fs::write(
        root.join("libs/kotlin.jar"),
        create_zip(&[("kotlin.js", "// stdlib"), ("kotlin.meta.js", "// meta")]),
    )
    .unwrap();

    let config = formatdoc! {r#"
        enabled = {enabled}
        destination_dir = "build/dce"
        source_files = ["src/app.js"]
        dependency_archives = ["libs/kotlin.jar"]
        keep = ["app.main"]

        [analyzer]
        command = ["sh", "-c", '''{script}''', "analyzer"]

        [analyzer.options]
        print_reachability_info = true
    "#, enabled = enabled, script = script};
    fs::write(root.join("jsdce.toml"), config).unwrap();
}

fn recording_script(root: &Path) -> String {
    format!(r#"printf '%s\n' "$@" > {}"#, root.join("args.txt").display())
}

#[test]
fn test_run_invokes_analyzer_and_removes_scratch() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, &recording_script(root));

    let output = jsdce()
        .current_dir(root)
        .args(["run", "--keep", "app.Extra"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Reduced 2 input file(s)"), "stdout: {}", stdout);

    let args = fs::read_to_string(root.join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "-print-reachability-info");
    assert_eq!(args[1], "-output-dir");
    assert!(args[2].ends_with("build/dce"));
    assert_eq!(args[3], "-keep");
    assert_eq!(args[4], "app.main,app.Extra");
    assert!(args[5].ends_with("src/app.js"));
    assert!(args[6].ends_with("kotlin.js"));
    assert_eq!(args.len(), 7);

    assert!(root.join("build/dce").is_dir());
    assert!(!root.join("build/dce/js-dependencies").exists());
}

#[test]
fn test_analyzer_failure_exits_with_analysis_code() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "echo unresolved main >&2; exit 3");

    let output = jsdce().current_dir(root).arg("run").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exit code 3"), "stderr: {}", stderr);
    assert!(stderr.contains("unresolved main"), "stderr: {}", stderr);
    assert!(!root.join("build/dce/js-dependencies").exists());
}

#[test]
fn test_disabled_task_prints_skip_message() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, false, "exit 1");

    let output = jsdce().current_dir(root).arg("run").output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "DCE was not enabled, skipping"
    );
    assert!(!root.join("build").exists());
}

#[test]
fn test_json_summary() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "exit 0");

    let output = jsdce()
        .current_dir(root)
        .args(["run", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["status"], "completed");
    assert_eq!(report["inputs"].as_array().unwrap().len(), 2);
    assert_eq!(report["metadata_skipped"], 1);
}

#[test]
fn test_config_discovered_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "exit 0");
    let nested = root.join("src").join("deeper");
    fs::create_dir_all(&nested).unwrap();

    jsdce().current_dir(&nested).arg("run").assert().success();
}

#[test]
fn test_project_local_analyzer_resolves_against_config_dir() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("tools")).unwrap();
    let script = root.join("tools/dce.sh");
    fs::write(&script, "#!/bin/sh\ntouch \"$0.ran\"\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        root.join("jsdce.toml"),
        "destination_dir = \"out\"\n[analyzer]\ncommand = [\"tools/dce.sh\"]\n",
    )
    .unwrap();
    let sub = root.join("sub");
    fs::create_dir_all(&sub).unwrap();

    jsdce().current_dir(&sub).arg("run").assert().success();
    assert!(root.join("tools/dce.sh.ran").is_file());
}

#[test]
fn test_logs_are_plain_text_when_stderr_is_not_a_terminal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "exit 0");

    let output = jsdce().current_dir(root).args(["run", "-v"]).output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DCE finished"), "stderr: {}", stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {:?}", stderr);
}

#[test]
fn test_explicit_config_path() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "exit 0");
    let elsewhere = TempDir::new().unwrap();

    jsdce()
        .current_dir(elsewhere.path())
        .args(["run", "--config"])
        .arg(root.join("jsdce.toml"))
        .assert()
        .success();
    assert!(root.join("build/dce").is_dir());
}

#[test]
fn test_unreadable_config_exits_with_io_code() {
    let temp = TempDir::new().unwrap();

    jsdce()
        .current_dir(temp.path())
        .args(["run", "--config", "absent.toml"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_option_exits_with_config_code() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("jsdce.toml"),
        "destination_dir = \"out\"\n[analyzer.options]\nminify = true\n",
    )
    .unwrap();

    jsdce().current_dir(temp.path()).arg("run").assert().code(3);
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_unknown_analyzer_exits_with_launch_code() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_project(root, true, "exit 0");

    jsdce()
        .current_dir(root)
        .args(["run", "--analyzer", "jsdce-no-such-analyzer-binary"])
        .assert()
        .code(5);
    assert!(!root.join("build/dce/js-dependencies").exists());
}

#[test]
fn test_init_creates_config_once() {
    let temp = TempDir::new().unwrap();

    jsdce().current_dir(temp.path()).arg("init").assert().success();
    assert!(temp.path().join("jsdce.toml").is_file());

    jsdce().current_dir(temp.path()).arg("init").assert().failure();
    jsdce()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
