use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::cache_context;

/// File-based cache for league data with two-tier system
///
/// `raw/` keeps provider payloads as received, `parsed/` keeps league
/// snapshots ready for ranking.
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            raw_dir,
            parsed_dir,
        })
    }

    /// Save raw API response to cache
    pub fn save_raw(&self, key: &str, data: &Value) -> Result<()> {
        let file_path = self.build_raw_path(key);
        self.write_json(&file_path, data)
            .with_context(|| cache_context("save raw", key))?;
        info!("Saved raw data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load raw API response from cache
    pub fn load_raw(&self, key: &str) -> Result<Option<Value>> {
        let file_path = self.build_raw_path(key);
        self.read_json_opt(&file_path)
            .with_context(|| cache_context("load raw", key))
    }

    /// Save parsed data to cache
    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_parsed_path(key);
        self.write_json(&file_path, data)
            .with_context(|| cache_context("save parsed", key))?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load parsed data from cache
    pub fn load_parsed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_parsed_path(key);
        let data = self
            .read_json_opt(&file_path)
            .with_context(|| cache_context("load parsed", key))?;
        if data.is_some() {
            info!("Loaded data from cache: {}", file_path.display());
        }
        Ok(data)
    }

    // --- Helper Methods ---

    fn build_raw_path(&self, key: &str) -> PathBuf {
        self.raw_dir.join(format!("{}.json", key))
    }

    fn build_parsed_path(&self, key: &str) -> PathBuf {
        self.parsed_dir.join(format!("{}.json", key))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }
}
