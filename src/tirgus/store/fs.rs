use super::KvStore;
use crate::error::{Result, TirgusError};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed snapshot storage: one `<key>.json` file per key inside a
/// single data directory. The directory is created lazily on first write.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TirgusError::Io)?;
        }
        Ok(())
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(path).map_err(TirgusError::Io)?;
        Ok(Some(payload))
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        self.ensure_root()?;
        fs::write(self.key_path(key), payload).map_err(TirgusError::Io)?;
        Ok(())
    }
}
