//! Directory-backed snapshot store for native hosts.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{CacheResult, SnapshotStore};

/// One `<key>.json` file per slot
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the cache directory
    pub fn open(dir: impl AsRef<Path>) -> CacheResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Written to a temporary sibling and renamed into place, so readers see
    /// either the old snapshot or the new one.
    fn write(&self, key: &str, value: &str) -> CacheResult<()> {
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{}.json.tmp", key));

        let mut file = fs::File::create(&staging)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&staging, &target)?;
        Ok(())
    }
}
