//! Version-control capability: the operations a shelve run needs from a repository,
//! expressed as a trait so the engine can be exercised against in-memory fakes.

use std::path::PathBuf;

use crate::errors::ShelveError;

/// One local branch as reported by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub commit_id: String,
    pub is_current: bool,
}

/// How a working-tree path differs from the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

/// One pending change in the primary working tree. Transient: produced and
/// consumed within a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingTreeEntry {
    pub relative_path: PathBuf,
    pub kind: ChangeKind,
}

/// A configured remote with its push URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub push_url: String,
}

/// Operations invoked on an addressable repository (the primary working repo
/// or the shadow repo). The production implementation shells out to git;
/// tests substitute in-memory fakes.
pub trait Vcs {
    /// List local branches with their tip commits and the current flag.
    fn branch_local(&self) -> Result<Vec<BranchInfo>, ShelveError>;

    /// Fetch the named remotes, refreshing remote-tracking refs.
    fn fetch(&self, remotes: &[&str]) -> Result<(), ShelveError>;

    /// Pass-through checkout with raw arguments (e.g. `["-B", branch, start]`).
    fn checkout(&self, args: &[&str]) -> Result<(), ShelveError>;

    /// Remove untracked files and directories from the working tree.
    fn clean_force(&self) -> Result<(), ShelveError>;

    /// Revert the given commit, creating the inverse commit non-interactively.
    fn revert(&self, commit_id: &str) -> Result<(), ShelveError>;

    /// Pending working-tree changes relative to the last commit.
    fn status(&self) -> Result<Vec<WorkingTreeEntry>, ShelveError>;

    /// Stage every change in the working tree, deletions included.
    fn add_all(&self) -> Result<(), ShelveError>;

    /// Commit staged changes with the given message. Must succeed even when
    /// nothing changed so consecutive runs converge.
    fn commit(&self, message: &str) -> Result<(), ShelveError>;

    /// Push a branch to the named remote, creating or updating the remote
    /// branch of the same name.
    fn push(&self, remote: &str, branch: &str) -> Result<(), ShelveError>;

    /// Initialize a fresh repository at the handle's path.
    fn init(&self) -> Result<(), ShelveError>;

    /// Register a remote by name and URL.
    fn add_remote(&self, name: &str, url: &str) -> Result<(), ShelveError>;

    /// List configured remotes with their push URLs.
    fn remotes(&self) -> Result<Vec<RemoteInfo>, ShelveError>;
}

/// Find the currently checked-out branch of a repository.
///
/// Absent (no branches, or none flagged current as with a detached or unborn
/// HEAD) is fatal only when `required` is set: the primary repository must
/// have a branch to shelve, while absence in the shadow repository just
/// signals a first run.
pub fn resolve_current_branch<V: Vcs + ?Sized>(
    repo: &V,
    required: bool,
) -> Result<Option<BranchInfo>, ShelveError> {
    let branches = repo.branch_local()?;
    let current = branches.into_iter().find(|b| b.is_current);
    tracing::debug!(found = current.is_some(), "resolved current branch");
    match current {
        Some(b) => Ok(Some(b)),
        None if required => Err(ShelveError::NoBranchFound),
        None => Ok(None),
    }
}
