//! Run configuration: resolved once at startup from the CLI arguments and
//! passed by reference into the provisioner and engine. No ambient state.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

/// Everything one shelve run needs to know. Owned by the run, never shared
/// across processes.
#[derive(Debug, Clone)]
pub struct ShelveConfig {
    /// The user's working repository whose uncommitted changes are shelved.
    pub primary_path: PathBuf,
    /// The hidden sibling repository mirroring the uncommitted state.
    pub shadow_path: PathBuf,
    /// Push remote to mirror when the primary has more than one remote.
    pub remote_override: Option<String>,
}

impl ShelveConfig {
    /// Resolve the configuration from the CLI arguments. Relative repository
    /// paths are resolved against the current working directory.
    pub fn resolve(repo_arg: &Path, remote_override: Option<String>) -> io::Result<Self> {
        let primary_path = resolve_primary_path(repo_arg)?;
        let shadow_path = shadow_path_for(&primary_path)?;
        Ok(Self {
            primary_path,
            shadow_path,
            remote_override,
        })
    }
}

fn resolve_primary_path(arg: &Path) -> io::Result<PathBuf> {
    let joined = if arg.is_absolute() {
        arg.to_path_buf()
    } else {
        env::current_dir()?.join(arg)
    };
    // Prefer the canonical path so the shadow sibling lands next to the real
    // directory even when the argument ends in "." or "..".
    Ok(fs::canonicalize(&joined).unwrap_or(joined))
}

/// Deterministic shadow location: a hidden sibling named after the primary
/// repository directory, suffixed `_autoshelved`.
pub fn shadow_path_for(primary: &Path) -> io::Result<PathBuf> {
    let name = primary.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("repository path {} has no directory name", primary.display()),
        )
    })?;
    let parent = primary.parent().unwrap_or_else(|| Path::new("/"));
    Ok(parent.join(format!(".{}_autoshelved", name.to_string_lossy())))
}

/// Shadow branch tied to both the operator and the shelved branch, so users
/// and branches sharing one shadow repository cannot collide.
pub fn shadow_branch_name(primary_branch: &str) -> String {
    format!("autoshelve/{}/{}", current_username(), primary_branch)
}

/// The current OS user, resolved once per process.
pub fn current_username() -> &'static str {
    static USERNAME: OnceCell<String> = OnceCell::new();
    USERNAME.get_or_init(|| {
        #[cfg(unix)]
        {
            if let Ok(Some(user)) = nix::unistd::User::from_uid(nix::unistd::getuid()) {
                return user.name;
            }
        }
        let var = if cfg!(windows) { "USERNAME" } else { "USER" };
        env::var(var).unwrap_or_else(|_| "unknown".to_string())
    })
}
