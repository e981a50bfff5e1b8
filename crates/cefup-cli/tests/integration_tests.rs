use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test context running the binary inside a scratch invocation directory.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    fn cefup_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_cefup");
        let mut cmd = Command::new(bin_path);
        cmd.current_dir(self.temp_dir.path());
        cmd
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .cefup_cmd()
        .arg("--help")
        .output()
        .expect("failed to run cefup");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--target"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .cefup_cmd()
        .arg("--version")
        .output()
        .expect("failed to run cefup");
    assert!(output.status.success());
}

#[test]
fn test_invalid_target_is_rejected() {
    let ctx = TestContext::new();
    let output = ctx
        .cefup_cmd()
        .args(["--target", "Fastest"])
        .output()
        .expect("failed to run cefup");
    assert!(!output.status.success());
}

#[test]
fn test_missing_cmake_exits_fatal() {
    let ctx = TestContext::new();
    // An empty PATH makes the cmake preflight check fail before any
    // network or filesystem work happens.
    let output = ctx
        .cefup_cmd()
        .env("PATH", "")
        .output()
        .expect("failed to run cefup");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[FATAL]"));
    assert!(stderr.contains("cmake"));
}

#[test]
fn test_delivery_path_conflict_exits_fatal() {
    let ctx = TestContext::new();
    // A regular file where the delivery directory belongs is a conflict the
    // operator must resolve; it is detected before any toolchain check.
    std::fs::write(ctx.root().join("ExaequOS"), b"in the way").unwrap();

    let output = ctx
        .cefup_cmd()
        .output()
        .expect("failed to run cefup");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("remove"));

    // The conflicting file is left in place for the operator.
    assert!(ctx.root().join("ExaequOS").is_file());
}

#[test]
fn test_delivery_dir_is_wiped_even_when_preflight_fails() {
    let ctx = TestContext::new();
    let delivery = ctx.root().join("ExaequOS");
    std::fs::create_dir_all(delivery.join("locales")).unwrap();
    std::fs::write(delivery.join("icudtl.dat"), b"stale").unwrap();

    // Force a failure right after the delivery check.
    let output = ctx
        .cefup_cmd()
        .env("PATH", "")
        .output()
        .expect("failed to run cefup");
    assert_eq!(output.status.code(), Some(2));

    // The stale delivery tree is already gone.
    assert!(!delivery.exists());
}
