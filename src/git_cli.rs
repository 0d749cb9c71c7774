//! Production [`Vcs`] implementation that shells out to the system `git` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::errors::ShelveError;
use crate::vcs::{BranchInfo, ChangeKind, RemoteInfo, Vcs, WorkingTreeEntry};

/// Run a git command with -C <repo>. Returns Output on invocation success.
fn git(repo: &Path, args: &[&str]) -> std::io::Result<Output> {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    for a in args {
        cmd.arg(a);
    }
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.output()
}

/// A repository handle addressing one working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn path(&self) -> &Path {
        &self.repo
    }

    /// Invoke git and map a non-zero exit to `ShelveError::Git` carrying the
    /// trimmed stderr (stdout as fallback when stderr is empty).
    fn run(&self, action: &'static str, args: &[&str]) -> Result<Output, ShelveError> {
        tracing::debug!(repo = %self.repo.display(), ?args, "git");
        let out = git(&self.repo, args)?;
        if out.status.success() {
            Ok(out)
        } else {
            let mut detail = String::from_utf8_lossy(&out.stderr).trim().to_string();
            if detail.is_empty() {
                detail = String::from_utf8_lossy(&out.stdout).trim().to_string();
            }
            Err(ShelveError::Git { action, detail })
        }
    }
}

impl Vcs for GitCli {
    fn branch_local(&self) -> Result<Vec<BranchInfo>, ShelveError> {
        let out = self.run(
            "branch",
            &[
                "branch",
                "--list",
                "--format=%(HEAD)%09%(refname:short)%09%(objectname)",
            ],
        )?;
        Ok(parse_branch_list(&String::from_utf8_lossy(&out.stdout)))
    }

    fn fetch(&self, remotes: &[&str]) -> Result<(), ShelveError> {
        let mut args = vec!["fetch"];
        args.extend_from_slice(remotes);
        self.run("fetch", &args).map(|_| ())
    }

    fn checkout(&self, args: &[&str]) -> Result<(), ShelveError> {
        let mut full = vec!["checkout"];
        full.extend_from_slice(args);
        self.run("checkout", &full).map(|_| ())
    }

    fn clean_force(&self) -> Result<(), ShelveError> {
        self.run("clean", &["clean", "-f", "-d"]).map(|_| ())
    }

    fn revert(&self, commit_id: &str) -> Result<(), ShelveError> {
        // --no-edit: keep the generated message, never block on an editor
        self.run("revert", &["revert", "--no-edit", commit_id])
            .map(|_| ())
    }

    fn status(&self) -> Result<Vec<WorkingTreeEntry>, ShelveError> {
        let out = self.run("status", &["status", "--porcelain=v1", "-uall"])?;
        Ok(parse_status_porcelain(&String::from_utf8_lossy(&out.stdout)))
    }

    fn add_all(&self) -> Result<(), ShelveError> {
        self.run("add", &["add", "-A"]).map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<(), ShelveError> {
        // --allow-empty so a run with no pending changes still records a snapshot
        self.run("commit", &["commit", "--allow-empty", "-m", message])
            .map(|_| ())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), ShelveError> {
        self.run("push", &["push", remote, branch]).map(|_| ())
    }

    fn init(&self) -> Result<(), ShelveError> {
        self.run("init", &["init"]).map(|_| ())
    }

    fn add_remote(&self, name: &str, url: &str) -> Result<(), ShelveError> {
        self.run("remote", &["remote", "add", name, url]).map(|_| ())
    }

    fn remotes(&self) -> Result<Vec<RemoteInfo>, ShelveError> {
        let out = self.run("remote", &["remote", "-v"])?;
        Ok(parse_remotes_verbose(&String::from_utf8_lossy(&out.stdout)))
    }
}

fn parse_branch_list(s: &str) -> Vec<BranchInfo> {
    s.lines()
        .filter_map(|line| {
            let mut cols = line.split('\t');
            let head = cols.next()?;
            let name = cols.next()?.trim();
            let commit = cols.next()?.trim();
            // Skip git's synthetic "(HEAD detached at ...)" entry: a detached
            // HEAD means no current branch.
            if name.is_empty() || name.starts_with('(') {
                return None;
            }
            Some(BranchInfo {
                name: name.to_string(),
                commit_id: commit.to_string(),
                is_current: head == "*",
            })
        })
        .collect()
}

/// Undo the C-style quoting git applies to paths with special characters.
fn unquote_path(s: &str) -> String {
    let b = s.as_bytes();
    if b.len() < 2 || b[0] != b'"' || b[b.len() - 1] != b'"' {
        return s.to_string();
    }
    let inner = &s[1..s.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn parse_status_porcelain(s: &str) -> Vec<WorkingTreeEntry> {
    let mut entries = Vec::new();
    for line in s.lines() {
        if line.len() < 4 {
            continue;
        }
        let x = line.as_bytes()[0] as char;
        let y = line.as_bytes()[1] as char;
        let rest = &line[3..];

        // A rename is one line "R  old -> new": old path vanishes, new appears.
        if x == 'R' || y == 'R' {
            if let Some((old, new)) = rest.split_once(" -> ") {
                entries.push(WorkingTreeEntry {
                    relative_path: PathBuf::from(unquote_path(old)),
                    kind: ChangeKind::Deleted,
                });
                entries.push(WorkingTreeEntry {
                    relative_path: PathBuf::from(unquote_path(new)),
                    kind: ChangeKind::Added,
                });
            }
            continue;
        }

        let kind = if x == 'D' || y == 'D' {
            ChangeKind::Deleted
        } else if x == '?' || x == 'A' {
            ChangeKind::Added
        } else {
            ChangeKind::Modified
        };
        entries.push(WorkingTreeEntry {
            relative_path: PathBuf::from(unquote_path(rest)),
            kind,
        });
    }
    entries
}

fn parse_remotes_verbose(s: &str) -> Vec<RemoteInfo> {
    s.lines()
        .filter_map(|line| {
            let line = line.trim_end();
            let rest = line.strip_suffix("(push)")?.trim_end();
            let (name, url) = rest.split_once('\t')?;
            Some(RemoteInfo {
                name: name.trim().to_string(),
                push_url: url.trim().to_string(),
            })
        })
        .collect()
}
