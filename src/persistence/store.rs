use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Name of the single persisted key
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Backend holding one integer high score
pub trait HighScoreStore {
    /// Read the stored value, `None` if nothing was ever saved
    fn load(&mut self) -> Result<Option<u32>>;

    /// Replace the stored value
    fn save(&mut self, high_score: u32) -> Result<()>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "highScore")]
    high_score: u32,
}

/// High score kept in a small JSON file, `{"highScore": N}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))?;

        Ok(Some(record.high_score))
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// Process-local store, for tests and hosts without durable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    unavailable: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `high_score`
    pub fn with_value(high_score: u32) -> Self {
        Self {
            value: Some(high_score),
            ..Self::default()
        }
    }

    /// A store whose every read and write fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<u32>> {
        if self.unavailable {
            bail!("storage unavailable");
        }
        Ok(self.value)
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if self.unavailable {
            bail!("storage unavailable");
        }
        self.value = Some(high_score);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("scores.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        JsonFileStore::new(&path).save(140).unwrap();

        let mut reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(140));
    }

    #[test]
    fn test_file_uses_named_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        JsonFileStore::new(&path).save(7).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[HIGH_SCORE_KEY], 7);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(30).unwrap();
        assert_eq!(store.load().unwrap(), Some(30));
        assert_eq!(store.writes(), 1);

        let mut broken = MemoryStore::unavailable();
        assert!(broken.load().is_err());
        assert!(broken.save(1).is_err());
    }
}
