mod common;

use std::process::Command;

use common::*;

#[test]
fn test_cli_dry_run_previews_plan_without_mutation() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let primary = td.path().join("app");
    std::fs::create_dir(&primary).unwrap();
    init_repo_with_commit(&primary, &[("README.md", "hello\n")]);

    let bin = env!("CARGO_BIN_EXE_autoshelve");
    let out = Command::new(bin)
        .arg("--dry-run")
        .arg(&primary)
        .output()
        .expect("failed to run autoshelve --dry-run");

    assert!(
        out.status.success(),
        "autoshelve --dry-run exited non-zero: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    let err = String::from_utf8_lossy(&out.stderr);
    assert!(
        err.contains("autoshelve: shadow:"),
        "expected the resolved shadow path in stderr, got:\n{}",
        err
    );
    assert!(
        err.contains("autoshelve: branch: autoshelve/"),
        "expected the shadow branch preview in stderr, got:\n{}",
        err
    );
    assert!(
        err.contains("dry-run requested"),
        "expected the dry-run notice in stderr, got:\n{}",
        err
    );
    assert!(
        !td.path().join(".app_autoshelved").exists(),
        "dry-run must not create the shadow directory"
    );
}
