use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::errors::{ FlipperError, FlipperResult };
use crate::traits::key_value_store::KeyValueStore;

/// Key-value store kept as one JSON object on disk.
///
/// Every `set` rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> FlipperResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs
            ::read_to_string(&self.path)
            .map_err(|e|
                FlipperError::Persistence(format!("Failed to read {}: {}", self.path.display(), e))
            )?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json
            ::from_str(&content)
            .map_err(|e|
                FlipperError::Persistence(format!("Corrupt store {}: {}", self.path.display(), e))
            )
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FlipperResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> FlipperResult<()> {
        // An unreadable file is replaced rather than blocking every future write
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs
                ::create_dir_all(parent)
                .map_err(|e|
                    FlipperError::Persistence(
                        format!("Failed to create {}: {}", parent.display(), e)
                    )
                )?;
        }

        let content = serde_json
            ::to_string_pretty(&entries)
            .map_err(|e| FlipperError::Persistence(e.to_string()))?;
        let temp_path = self.path.with_extension("json.tmp");
        fs
            ::write(&temp_path, content)
            .and_then(|_| fs::rename(&temp_path, &self.path))
            .map_err(|e|
                FlipperError::Persistence(format!("Failed to write {}: {}", self.path.display(), e))
            )?;

        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::at_path(&path);
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "[1,2,3]").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::at_path(&path);
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_file_reports_persistence_error_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::at_path(&path);
        assert!(matches!(store.get("k"), Err(FlipperError::Persistence(_))));

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
