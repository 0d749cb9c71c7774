use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[allow(dead_code)]
pub fn have_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run git in `repo`, asserting success, and return trimmed stdout.
#[allow(dead_code)]
pub fn git(repo: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .expect("failed to invoke git");
    assert!(
        out.status.success(),
        "git {:?} in {} failed:\n{}",
        args,
        repo.display(),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[allow(dead_code)]
pub fn configure_identity(repo: &Path) {
    git(repo, &["config", "user.name", "Autoshelve Test"]);
    git(repo, &["config", "user.email", "autoshelve@example.com"]);
}

/// Initialize a repository with an identity and one commit of the given files.
#[allow(dead_code)]
pub fn init_repo_with_commit(repo: &Path, files: &[(&str, &str)]) {
    git(repo, &["init"]);
    configure_identity(repo);
    for (name, contents) in files {
        std::fs::write(repo.join(name), contents).expect("write file");
    }
    git(repo, &["add", "-A"]);
    git(repo, &["commit", "-m", "init"]);
}

/// Create a bare repository next to `primary` and register it as the named remote.
#[allow(dead_code)]
pub fn add_bare_remote(primary: &Path, parent: &Path, remote: &str) -> PathBuf {
    let bare = parent.join(format!("{}.git", remote));
    std::fs::create_dir(&bare).expect("mkdir bare");
    git(&bare, &["init", "--bare"]);
    git(
        primary,
        &["remote", "add", remote, &bare.to_string_lossy()],
    );
    bare
}

#[allow(dead_code)]
pub fn current_branch_name(repo: &Path) -> String {
    git(repo, &["rev-parse", "--abbrev-ref", "HEAD"])
}
