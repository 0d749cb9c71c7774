//! One-time provisioning of the shadow repository: directory, hidden marker,
//! `git init`, and the two remotes ("origin" = the primary's local path,
//! "server" = the primary's resolved push remote).

use crate::errors::ShelveError;
use crate::fsx::FsOps;
use crate::settings::ShelveConfig;
use crate::vcs::{RemoteInfo, Vcs};

/// Ensure the shadow repository exists, is hidden, and has its remotes
/// configured. Idempotent: a path that already exists and is marked hidden is
/// taken as provisioned and left untouched. Returns whether first-time setup
/// ran.
pub fn ensure_shadow_repo<V: Vcs, F: FsOps>(
    config: &ShelveConfig,
    primary: &V,
    shadow: &V,
    fs: &F,
) -> Result<bool, ShelveError> {
    if fs.is_hidden(&config.shadow_path).unwrap_or(false) {
        return Ok(false);
    }

    tracing::info!(path = %config.shadow_path.display(), "provisioning shadow repository");
    fs.create_dir_all(&config.shadow_path)?;
    fs.hide(&config.shadow_path)?;
    shadow.init()?;
    shadow.add_remote("origin", &config.primary_path.to_string_lossy())?;

    let remotes = primary.remotes()?;
    let server = choose_push_remote(&remotes, config.remote_override.as_deref())
        .ok_or(ShelveError::NoRemoteFound)?;
    shadow.add_remote("server", &server.push_url)?;
    Ok(true)
}

/// Pick the push remote to mirror: an explicit override name first, then a
/// remote literally named "origin", then the sole remote if exactly one
/// exists.
pub fn choose_push_remote<'a>(
    remotes: &'a [RemoteInfo],
    override_name: Option<&str>,
) -> Option<&'a RemoteInfo> {
    if let Some(name) = override_name {
        if let Some(r) = remotes.iter().find(|r| r.name == name) {
            return Some(r);
        }
    }
    if let Some(r) = remotes.iter().find(|r| r.name == "origin") {
        return Some(r);
    }
    if remotes.len() == 1 {
        return Some(&remotes[0]);
    }
    None
}
