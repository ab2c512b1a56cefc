use super::codec::{decode, encode};
use super::{Decoded, Loader};
use crate::error::{Error, Result};
use crate::model::RecordStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Keeps the records in a single text file.
#[derive(Debug)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> FileLoader {
        FileLoader { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for FileLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Decoded> {
        let text = fs::read_to_string(&self.path).map_err(|source| Error::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;
        let decoded = decode(&text);
        if decoded.skipped > 0 {
            warn!(skipped = decoded.skipped, "some records could not be read");
        }
        info!(students = decoded.store.len(), "loaded students");
        Ok(decoded)
    }

    #[instrument(skip_all, fields(path = %self.path.display(), students = store.len()))]
    fn save(&self, store: &RecordStore) -> Result<()> {
        fs::write(&self.path, encode(store)).map_err(|source| Error::SinkUnavailable {
            path: self.path.clone(),
            source,
        })?;
        info!("saved students");
        Ok(())
    }
}
