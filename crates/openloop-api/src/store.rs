//! File-backed token storage
//!
//! One bearer token per `.txt` file under the token directory. Files are
//! the unit of identity: tokens are created by saving a new file and only
//! destroyed by deleting one manually — the store never overwrites or
//! removes anything.
//!
//! Listing order is file-name order. The upstream contract only requires
//! an order that is stable within a run; sorting makes it stable across
//! runs too, so account ids in the logs stay consistent.

use std::path::{Path, PathBuf};

use common::Secret;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Token directory manager.
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    /// Open the store, creating the directory on first run.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Io(format!("creating token directory {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every persisted token, trimmed, in file-name order.
    ///
    /// Non-`.txt` files are ignored; empty token files are skipped rather
    /// than surfaced as empty accounts. An empty directory yields an empty
    /// vector, not an error.
    pub async fn list(&self) -> Result<Vec<Secret<String>>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| Error::Io(format!("reading token directory: {e}")))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Io(format!("reading token directory entry: {e}")))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".txt") {
                names.push(name);
            }
        }
        names.sort();

        let mut tokens = Vec::with_capacity(names.len());
        for name in names {
            let path = self.dir.join(&name);
            let contents = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Io(format!("reading token file {}: {e}", path.display())))?;
            let token = contents.trim();
            if token.is_empty() {
                debug!(file = %name, "skipping empty token file");
                continue;
            }
            tokens.push(Secret::new(token.to_owned()));
        }
        debug!(count = tokens.len(), "listed saved tokens");
        Ok(tokens)
    }

    /// Persist a new token as an additional file.
    ///
    /// Picks the first free `token_{n}.txt` name so an existing file is
    /// never overwritten, whatever else lives in the directory.
    pub async fn save(&self, token: &str) -> Result<PathBuf> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::InvalidToken("token is empty".into()));
        }

        let mut n = self.txt_file_count().await? + 1;
        let path = loop {
            let candidate = self.dir.join(format!("token_{n}.txt"));
            let exists = tokio::fs::try_exists(&candidate)
                .await
                .map_err(|e| Error::Io(format!("checking {}: {e}", candidate.display())))?;
            if !exists {
                break candidate;
            }
            n += 1;
        };

        tokio::fs::write(&path, token)
            .await
            .map_err(|e| Error::Io(format!("writing token file {}: {e}", path.display())))?;
        info!(file = %path.display(), "saved new token");
        Ok(path)
    }

    async fn txt_file_count(&self) -> Result<usize> {
        let mut count = 0;
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| Error::Io(format!("reading token directory: {e}")))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Io(format!("reading token directory entry: {e}")))?
        {
            if entry.file_name().to_string_lossy().ends_with(".txt") {
                count += 1;
            }
        }
        Ok(count)
    }
}
