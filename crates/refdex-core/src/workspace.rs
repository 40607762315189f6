//! Scratch workspace for one catalog build.
//!
//! A [`Workspace`] owns the directory the fetch stage unpacks archives into.
//! Each package gets a distinct subdirectory, so parallel fetches never write
//! to the same path. The temp-backed variant removes the whole tree when the
//! workspace is dropped, on success and on error alike; no ambient temp-dir
//! state survives between runs.

use crate::Result;
use flate2::read::GzDecoder;
use std::fs;
use std::path::{Path, PathBuf};
use tar::Archive;
use tempfile::TempDir;
use tracing::debug;

/// Scratch directory holding unpacked package trees for one catalog build.
pub struct Workspace {
    root: WorkspaceRoot,
}

enum WorkspaceRoot {
    Temp(TempDir),
    Fixed(PathBuf),
}

impl Workspace {
    /// Creates a temp-backed workspace, removed when the value is dropped.
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("refdex-")?;
        debug!("scratch workspace at {}", dir.path().display());
        Ok(Self {
            root: WorkspaceRoot::Temp(dir),
        })
    }

    /// Creates a workspace at a caller-supplied path.
    ///
    /// The directory is created if missing and is NOT removed on drop; the
    /// caller owns its lifetime.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Ok(Self {
            root: WorkspaceRoot::Fixed(path),
        })
    }

    /// Root directory of the workspace.
    pub fn root(&self) -> &Path {
        match &self.root {
            WorkspaceRoot::Temp(dir) => dir.path(),
            WorkspaceRoot::Fixed(path) => path,
        }
    }

    /// Directory a package's archive is unpacked into.
    pub fn package_dir(&self, id: &str) -> PathBuf {
        self.root().join(sanitize_dir_name(id))
    }

    /// Unpacks a gzipped tar archive into the package's subdirectory and
    /// returns that directory.
    pub fn unpack_archive(&self, id: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dest = self.package_dir(id);
        fs::create_dir_all(&dest)?;

        let decoder = GzDecoder::new(bytes);
        let mut archive = Archive::new(decoder);
        archive.unpack(&dest)?;

        debug!("unpacked {} into {}", id, dest.display());
        Ok(dest)
    }
}

/// Restrict a package identifier to a conservative set of filename
/// characters so the per-package directory stays rooted under the workspace
/// even for hostile identifiers. Anything else becomes an underscore.
fn sanitize_dir_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Collapse any ".." segments that could be introduced either by the
    // caller or by the substitution above.
    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", "_");
    }

    if sanitized.is_empty() {
        "package".to_string()
    } else {
        sanitized
    }
}
