//! Error mapping guide:
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - Every failure surfaces unmodified to main; no retries, no partial-success reporting.
use std::fmt;
use std::io;

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Failure kinds for a shelve run.
#[derive(Debug)]
pub enum ShelveError {
    /// The primary repository has no current branch; nothing to shelve.
    NoBranchFound,
    /// Provisioning could not determine which push remote to mirror.
    NoRemoteFound,
    /// A steady-state run expected the shadow branch from a prior run and the checkout failed.
    UnexpectedShadowState { branch: String, detail: String },
    /// An underlying git invocation exited non-zero.
    Git { action: &'static str, detail: String },
    /// A filesystem operation failed.
    Io(io::Error),
}

impl fmt::Display for ShelveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelveError::NoBranchFound => write!(f, "no branch found in the primary repository"),
            ShelveError::NoRemoteFound => write!(f, "no remote repository found"),
            ShelveError::UnexpectedShadowState { branch, detail } => write!(
                f,
                "unexpected shadow repository state: checkout of {} failed: {}",
                branch, detail
            ),
            ShelveError::Git { action, detail } => write!(f, "git {} failed: {}", action, detail),
            ShelveError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShelveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShelveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShelveError {
    fn from(e: io::Error) -> Self {
        ShelveError::Io(e)
    }
}

/// Convert ShelveError to exit code (parity with io::Error mapping).
pub fn exit_code_for_shelve_error(e: &ShelveError) -> u8 {
    match e {
        ShelveError::Io(ioe) => exit_code_for_io_error(ioe),
        _ => 1,
    }
}
