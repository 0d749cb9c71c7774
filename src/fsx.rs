//! Filesystem capability for the shelve run: directory creation, file
//! copy/delete between the two working trees, and the hidden marker used to
//! detect an already-provisioned shadow directory.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

/// Filesystem operations injected into the provisioner and engine.
pub trait FsOps {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy `src` over `dst`, creating missing parent directories.
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Mark a path hidden from normal file browsing.
    fn hide(&self, path: &Path) -> io::Result<()>;

    /// Whether the path exists and is marked hidden. Errors (missing path
    /// included) mean "not provisioned" to callers.
    fn is_hidden(&self, path: &Path) -> io::Result<bool>;
}

/// Real filesystem implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FsOps for HostFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dst).map(|_| ())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    #[cfg(unix)]
    fn hide(&self, path: &Path) -> io::Result<()> {
        // Dot-prefixed names are the hidden convention; the shadow path is
        // always computed with one.
        if dot_named(path) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a dot-named path", path.display()),
            ))
        }
    }

    #[cfg(windows)]
    fn hide(&self, path: &Path) -> io::Result<()> {
        let st = std::process::Command::new("attrib")
            .arg("+h")
            .arg(path)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()?;
        if st.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!(
                "attrib +h failed for {}",
                path.display()
            )))
        }
    }

    #[cfg(unix)]
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path)?;
        Ok(dot_named(path))
    }

    #[cfg(windows)]
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        use std::os::windows::fs::MetadataExt;
        let meta = fs::metadata(path)?;
        Ok(meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
    }
}

#[cfg(unix)]
fn dot_named(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
