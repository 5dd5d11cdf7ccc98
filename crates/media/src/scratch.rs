use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{filename::unique_stem, mime::extension_for};

/// The directory where per-message media and avatar downloads land.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Open (creating if needed) the scratch directory.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A fresh, collision-free path inside the scratch directory, with the
    /// extension implied by `mime`.
    #[must_use]
    pub fn path_for(&self, prefix: &str, mime: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", unique_stem(prefix), extension_for(mime)))
    }
}

/// Exclusive owner of one scratch file.
///
/// The file is removed when the guard drops, whichever way the surrounding
/// operation ended. Ownership moves with the value: the transformer creates
/// the guard, the delivery engine consumes it, and the file is gone once the
/// delivery attempt completes or fails.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    mime: String,
}

impl TempFile {
    #[must_use]
    pub fn new(path: PathBuf, mime: impl Into<String>) -> Self {
        Self {
            path,
            mime: mime.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared MIME type of the file's content.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Base name for use as a multipart filename.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file.bin".to_string())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {},
            // Nothing was downloaded to the path; nothing to clean up.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to remove scratch file");
            },
        }
    }
}
