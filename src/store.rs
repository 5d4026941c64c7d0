//! JSON array store
//!
//! Each store file holds one pretty-printed JSON array. Appends read the
//! whole array, push the new element and replace the file atomically via a
//! temp file in the same directory. A file that no longer parses is moved
//! aside as `<name>.corrupt-<timestamp>` and the store starts over from an
//! empty array. One writer per file.

use crate::errors::{FeedError, FeedResult};
use crate::logger::{self, LogTag};
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct JsonArrayStore {
    path: PathBuf,
}

impl JsonArrayStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one element and return the new array length
    pub fn append<T: Serialize>(&self, record: &T) -> FeedResult<usize> {
        let mut values = self.load_values()?;
        values.push(serde_json::to_value(record)?);
        self.write_values(&values)?;

        logger::debug(
            LogTag::Store,
            &format!("Appended to {} ({} records)", self.path.display(), values.len()),
        );

        Ok(values.len())
    }

    /// Current contents; a corrupt file is backed up and read as empty
    ///
    /// Only I/O failures on the store file itself are returned.
    pub fn load_values(&self) -> FeedResult<Vec<Value>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };

        // Invalid UTF-8 (a write cut off inside a multi-byte char) fails here too
        match serde_json::from_slice::<Value>(&contents) {
            Ok(Value::Array(values)) => Ok(values),
            Ok(other) => {
                self.quarantine(&format!("expected a JSON array, found {}", json_kind(&other)));
                Ok(Vec::new())
            }
            Err(e) => {
                self.quarantine(&e.to_string());
                Ok(Vec::new())
            }
        }
    }

    /// Typed contents; unlike `load_values`, corrupt input is an error
    pub fn read_all<T: DeserializeOwned>(&self) -> FeedResult<Vec<T>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };

        serde_json::from_slice::<Vec<T>>(&contents).map_err(|e| {
            FeedError::Store(format!("Failed to read '{}': {}", self.path.display(), e))
        })
    }

    /// Replace the whole array
    pub fn write_all<T: Serialize>(&self, records: &[T]) -> FeedResult<()> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.write_values(&values)
    }

    /// Number of elements, 0 for a missing or corrupt file
    pub fn len(&self) -> usize {
        match self.read_contents() {
            Ok(Some(contents)) => match serde_json::from_slice::<Value>(&contents) {
                Ok(Value::Array(values)) => values.len(),
                _ => 0,
            },
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// File contents, `None` when the file is missing or blank
    fn read_contents(&self) -> FeedResult<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read(&self.path).map_err(|e| {
            FeedError::Store(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;

        if contents.iter().all(u8::is_ascii_whitespace) {
            Ok(None)
        } else {
            Ok(Some(contents))
        }
    }

    fn write_values(&self, values: &[Value]) -> FeedResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            FeedError::Store(format!("Failed to create directory '{}': {}", dir.display(), e))
        })?;

        let json = serde_json::to_string_pretty(values)?;

        // Temp file in the target directory so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            FeedError::Store(format!("Failed to replace '{}': {}", self.path.display(), e.error))
        })?;

        Ok(())
    }

    /// Move a corrupt store file aside so the next write starts clean
    fn quarantine(&self, reason: &str) {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "store.json".to_string());
        let backup = self.path.with_file_name(format!(
            "{}.corrupt-{}",
            file_name,
            Local::now().format("%Y%m%d-%H%M%S%.3f")
        ));

        match fs::rename(&self.path, &backup) {
            Ok(()) => logger::warning(
                LogTag::Store,
                &format!(
                    "Corrupt store '{}' ({}), moved to '{}' and starting empty",
                    self.path.display(),
                    reason,
                    backup.display()
                ),
            ),
            Err(e) => logger::warning(
                LogTag::Store,
                &format!(
                    "Corrupt store '{}' ({}), backup failed: {}; starting empty",
                    self.path.display(),
                    reason,
                    e
                ),
            ),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn corrupt_backups(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().contains(".corrupt-"))
            .collect()
    }

    #[test]
    fn test_append_grows_by_one() {
        let dir = TempDir::new().unwrap();
        let store = JsonArrayStore::new(dir.path().join("nested").join("parsed.json"));

        assert_eq!(store.len(), 0);
        assert_eq!(store.append(&json!({"n": 1})).unwrap(), 1);
        assert_eq!(store.append(&json!({"n": 2})).unwrap(), 2);
        assert_eq!(store.len(), 2);

        let values = store.load_values().unwrap();
        assert_eq!(values[0]["n"], 1);
        assert_eq!(values[1]["n"], 2);
    }

    #[test]
    fn test_truncated_file_starts_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(&path, "[{\"message\": \"half").unwrap();

        let store = JsonArrayStore::new(&path);
        assert_eq!(store.append(&json!({"message": "next"})).unwrap(), 1);

        let values: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(values, vec![json!({"message": "next"})]);

        let backups = corrupt_backups(dir.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "[{\"message\": \"half");
    }

    #[test]
    fn test_write_cut_inside_emoji_starts_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");
        let mut partial = b"[\n  {\n    \"message\": \"".to_vec();
        partial.extend_from_slice(&"🟢".as_bytes()[..2]);
        fs::write(&path, &partial).unwrap();

        let store = JsonArrayStore::new(&path);
        assert_eq!(store.append(&json!({"message": "next"})).unwrap(), 1);
        assert_eq!(store.append(&json!({"message": "again"})).unwrap(), 2);

        let backups = corrupt_backups(dir.path());
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read(&backups[0]).unwrap(), partial);
    }

    #[test]
    fn test_non_array_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(&path, "{\"message\": \"x\"}").unwrap();

        let store = JsonArrayStore::new(&path);
        assert!(store.load_values().unwrap().is_empty());
        assert_eq!(corrupt_backups(dir.path()).len(), 1);
    }

    #[test]
    fn test_empty_file_is_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(&path, "  \n").unwrap();

        let store = JsonArrayStore::new(&path);
        assert!(store.is_empty());
        assert_eq!(store.append(&json!(1)).unwrap(), 1);
        assert!(corrupt_backups(dir.path()).is_empty());
    }

    #[test]
    fn test_read_all_is_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parsed.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonArrayStore::new(&path);
        assert!(store.read_all::<Value>().is_err());
        // Strict reads leave the file alone
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_write_all_pretty_unescaped() {
        let dir = TempDir::new().unwrap();
        let store = JsonArrayStore::new(dir.path().join("fixed.json"));

        store.write_all(&[json!({"action": "🟢 BUY"})]).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("🟢 BUY"));
        assert!(text.contains("\n  {"));

        let back: Vec<Value> = store.read_all().unwrap();
        assert_eq!(back[0]["action"], "🟢 BUY");
    }
}
