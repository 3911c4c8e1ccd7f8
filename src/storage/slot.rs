// src/storage/slot.rs
//! Durable key-value slots

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::FsOps;

pub trait DurableSlot {
    /// `Ok(None)` when nothing has been stored under `key` yet
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", FsOps::normalize_key(key)))
    }
}

impl DurableSlot for FileSlot {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process slot; `failing()` rejects every write like a full quota would
#[derive(Debug, Default)]
pub struct MemorySlot {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            reject_writes: true,
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let slot = Self::new();
        if let Ok(mut entries) = slot.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        slot
    }
}

impl DurableSlot for MemorySlot {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::other("memory slot poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        if self.reject_writes {
            return Err(io::Error::other("storage quota exceeded"));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::other("memory slot poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());
        assert_eq!(slot.read("cv-builder-data").unwrap(), None);
    }

    #[test]
    fn test_file_slot_write_then_read_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("store"));

        slot.write("cv-builder-data", "{\"a\":1}").unwrap();
        slot.write("cv-builder-data", "{\"a\":2}").unwrap();

        assert_eq!(slot.read("cv-builder-data").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(slot.path_for("cv-builder-data").ends_with("cv-builder-data.json"));
        assert_eq!(std::fs::read_dir(slot.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_slot_key_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());
        let path = slot.path_for("../../etc/passwd");
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_memory_slot() {
        let slot = MemorySlot::with_entry("k", "v");
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("v"));
        slot.write("k", "w").unwrap();
        assert_eq!(slot.read("k").unwrap().as_deref(), Some("w"));
        assert_eq!(slot.read("other").unwrap(), None);
    }

    #[test]
    fn test_failing_memory_slot_rejects_writes() {
        let slot = MemorySlot::failing();
        let err = slot.write("k", "v").unwrap_err();
        assert!(err.to_string().contains("quota"));
    }
}
