// ABOUTME: Intent for copying a path out of a container as a tar archive.
// ABOUTME: The result keeps the raw archive and can list, read or unpack it.

use crate::controller::error::EngineError;
use crate::controller::sealed::Sealed;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[async_trait]
pub trait CopyArchiveFromContainerIntent: Sealed + Send + Sized {
    async fn perform(self) -> Result<CopyArchiveResult, EngineError>;
}

/// Tar archive of the requested path, fully buffered.
#[derive(Debug, Clone)]
pub struct CopyArchiveResult {
    archive: Bytes,
}

impl CopyArchiveResult {
    pub fn new(archive: Bytes) -> Self {
        Self { archive }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.archive
    }

    pub fn into_bytes(self) -> Bytes {
        self.archive
    }

    /// Paths of all entries in archive order.
    pub fn entries(&self) -> io::Result<Vec<PathBuf>> {
        let mut archive = tar::Archive::new(self.archive.as_ref());
        let mut paths = Vec::new();
        for entry in archive.entries()? {
            paths.push(entry?.path()?.into_owned());
        }
        Ok(paths)
    }

    /// Contents of the entry at `path`, if the archive has one.
    pub fn read_file(&self, path: impl AsRef<Path>) -> io::Result<Option<Vec<u8>>> {
        let wanted = path.as_ref();
        let mut archive = tar::Archive::new(self.archive.as_ref());
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.as_ref() == wanted {
                let mut contents = Vec::new();
                entry.read_to_end(&mut contents)?;
                return Ok(Some(contents));
            }
        }
        Ok(None)
    }

    /// Extract every entry below `destination`.
    pub fn unpack(&self, destination: impl AsRef<Path>) -> io::Result<()> {
        tar::Archive::new(self.archive.as_ref()).unpack(destination)
    }
}
