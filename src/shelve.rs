//! The sync engine: reset the shadow repository to a clean baseline, replay
//! the primary repository's pending changes onto it, commit, and publish.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::errors::ShelveError;
use crate::fsx::FsOps;
use crate::settings::{shadow_branch_name, ShelveConfig};
use crate::vcs::{resolve_current_branch, BranchInfo, ChangeKind, Vcs};

/// How this run treats the shadow repository, decided once by probing its
/// current branch and dispatched by match below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// The shadow repository has no branch yet; a baseline must be created
    /// from the fetched primary branch.
    FirstRun,
    /// A prior run left a snapshot commit; it is reverted to restore the
    /// baseline before the current diff is applied.
    SteadyState { prior: BranchInfo },
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelveOutcome {
    pub first_run: bool,
    /// The shadow branch the snapshot was pushed to.
    pub branch: String,
    pub files_applied: usize,
    pub files_deleted: usize,
}

/// One reconciliation run over a primary/shadow repository pair. All
/// collaborators are injected; the engine holds no state of its own.
pub struct ShelveEngine<'a, V: Vcs, F: FsOps> {
    primary: &'a V,
    shadow: &'a V,
    fs: &'a F,
    config: &'a ShelveConfig,
}

impl<'a, V: Vcs, F: FsOps> ShelveEngine<'a, V, F> {
    pub fn new(primary: &'a V, shadow: &'a V, fs: &'a F, config: &'a ShelveConfig) -> Self {
        Self {
            primary,
            shadow,
            fs,
            config,
        }
    }

    /// Shelve the given primary branch: reset or create the shadow branch,
    /// overlay the primary's pending changes, commit with a timestamp
    /// message, and push to the "server" remote. Any failing step aborts the
    /// run with no rollback.
    pub fn run(&self, branch: &BranchInfo) -> Result<ShelveOutcome, ShelveError> {
        let shelf = shadow_branch_name(&branch.name);

        // Refresh the shadow's view of the primary before choosing a baseline
        self.shadow.fetch(&["origin"])?;

        let mode = match resolve_current_branch(self.shadow, false)? {
            None => RunMode::FirstRun,
            Some(prior) => RunMode::SteadyState { prior },
        };

        match &mode {
            RunMode::FirstRun => {
                tracing::info!(branch = %shelf, "checking out origin branch for the first time");
                self.shadow
                    .checkout(&["-B", &shelf, &format!("origin/{}", branch.name)])?;
            }
            RunMode::SteadyState { prior } => {
                // The shadow branch must exist from the prior run; a failed
                // checkout means its state was altered externally.
                self.shadow.checkout(&[&shelf]).map_err(|e| match e {
                    ShelveError::Git { detail, .. } => ShelveError::UnexpectedShadowState {
                        branch: shelf.clone(),
                        detail,
                    },
                    other => other,
                })?;
                self.shadow.clean_force()?;
                tracing::debug!(commit = %prior.commit_id, "reverting previous snapshot");
                self.shadow.revert(&prior.commit_id)?;
            }
        }

        let entries = self.primary.status()?;
        let mut files_applied = 0;
        let mut files_deleted = 0;
        for entry in &entries {
            let target = self.config.shadow_path.join(&entry.relative_path);
            match entry.kind {
                ChangeKind::Deleted => {
                    tracing::info!(path = %entry.relative_path.display(), "deleting file");
                    self.fs.remove_file(&target)?;
                    files_deleted += 1;
                }
                ChangeKind::Added | ChangeKind::Modified => {
                    tracing::info!(path = %entry.relative_path.display(), "copying file");
                    let source = self.config.primary_path.join(&entry.relative_path);
                    self.fs.copy_file(&source, &target)?;
                    files_applied += 1;
                }
            }
        }

        self.shadow.add_all()?;
        self.shadow.commit(&snapshot_timestamp())?;
        self.shadow.push("server", &shelf)?;

        Ok(ShelveOutcome {
            first_run: matches!(mode, RunMode::FirstRun),
            branch: shelf,
            files_applied,
            files_deleted,
        })
    }
}

/// Commit message for a snapshot: the current UTC time, ISO-8601.
fn snapshot_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| format!("unix:{}", now.unix_timestamp()))
}
