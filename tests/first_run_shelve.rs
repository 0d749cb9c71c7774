mod common;

use autoshelve::{
    ensure_shadow_repo, resolve_current_branch, shadow_branch_name, GitCli, HostFs, ShelveConfig,
    ShelveEngine,
};
use common::*;

#[test]
fn test_first_run_creates_shadow_branch_and_pushes() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let root = td.path();
    let primary = root.join("app");
    std::fs::create_dir(&primary).unwrap();
    init_repo_with_commit(&primary, &[("README.md", "hello\n"), ("src.rs", "fn main() {}\n")]);
    let server = add_bare_remote(&primary, root, "origin");

    // Pending, uncommitted edits: one modification, one brand-new file
    std::fs::write(primary.join("README.md"), "hello world\n").unwrap();
    std::fs::write(primary.join("notes.txt"), "remember\n").unwrap();

    let config = ShelveConfig::resolve(&primary, None).expect("config");
    assert_eq!(
        config.shadow_path.file_name().unwrap().to_string_lossy(),
        ".app_autoshelved"
    );
    assert_eq!(config.shadow_path.parent(), config.primary_path.parent());

    let primary_git = GitCli::new(&config.primary_path);
    let shadow_git = GitCli::new(&config.shadow_path);
    let fs = HostFs;

    let created = ensure_shadow_repo(&config, &primary_git, &shadow_git, &fs).expect("provision");
    assert!(created, "first call must perform first-time setup");
    configure_identity(&config.shadow_path);

    let branch = resolve_current_branch(&primary_git, true)
        .expect("resolve")
        .expect("current branch");
    let outcome = ShelveEngine::new(&primary_git, &shadow_git, &fs, &config)
        .run(&branch)
        .expect("shelve run");

    let shelf = shadow_branch_name(&branch.name);
    assert!(outcome.first_run);
    assert_eq!(outcome.branch, shelf);
    assert_eq!(outcome.files_applied, 2);
    assert_eq!(outcome.files_deleted, 0);

    // Shadow tree = primary baseline + pending changes overlaid
    assert_eq!(current_branch_name(&config.shadow_path), shelf);
    assert_eq!(
        std::fs::read_to_string(config.shadow_path.join("README.md")).unwrap(),
        "hello world\n"
    );
    assert_eq!(
        std::fs::read_to_string(config.shadow_path.join("notes.txt")).unwrap(),
        "remember\n"
    );
    assert_eq!(
        std::fs::read_to_string(config.shadow_path.join("src.rs")).unwrap(),
        "fn main() {}\n"
    );

    // The snapshot commit reached the "server" remote under the same name
    let pushed = git(&server, &["rev-parse", "--verify", &format!("refs/heads/{}", shelf)]);
    let head = git(&config.shadow_path, &["rev-parse", "HEAD"]);
    assert_eq!(pushed, head);

    // The primary repository's own history is untouched
    assert_eq!(git(&primary, &["rev-list", "--count", "HEAD"]), "1");
}
