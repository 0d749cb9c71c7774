//! Autoshelve keeps a hidden "shadow" mirror of a working repository's
//! uncommitted state: a sibling repository that is overwritten on every run
//! to match whatever is currently on disk, committed, and pushed to the
//! primary repository's push remote as a safety snapshot. The working
//! branch's own history is never touched.
//!
//! A run is strictly sequential: resolve settings, resolve the primary's
//! current branch, lazily provision the shadow repository, then reconcile.
//! A first run creates the shadow branch from the fetched primary tip; a
//! steady-state run reverts the previous snapshot commit before the fresh
//! diff is replayed, committed, and pushed.

pub mod errors;
pub mod fsx;
pub mod git_cli;
pub mod provision;
pub mod settings;
pub mod shelve;
pub mod vcs;

pub use errors::{exit_code_for_io_error, exit_code_for_shelve_error, ShelveError};
pub use fsx::{FsOps, HostFs};
pub use git_cli::GitCli;
pub use provision::{choose_push_remote, ensure_shadow_repo};
pub use settings::{current_username, shadow_branch_name, shadow_path_for, ShelveConfig};
pub use shelve::{RunMode, ShelveEngine, ShelveOutcome};
pub use vcs::{
    resolve_current_branch, BranchInfo, ChangeKind, RemoteInfo, Vcs, WorkingTreeEntry,
};
