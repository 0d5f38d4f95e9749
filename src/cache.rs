use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{collections::HashMap, fs, path::Path};

use doxidx::index::IndexEntry;

/// Parsed entries for one shard, keyed by its content hash so edits
/// and regenerated documentation invalidate the cache automatically
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub entries: Vec<IndexEntry>,
}

pub type Cache = HashMap<String, CacheEntry>;

pub fn load_cache(cache_path: &Path) -> Cache {
    if cache_path.exists() {
        let content = fs::read_to_string(cache_path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        HashMap::new()
    }
}

pub fn save_cache(cache_path: &Path, cache: &Cache) {
    match serde_json::to_string(cache) {
        Ok(json) => {
            fs::write(cache_path, json).unwrap_or_else(|e| {
                use colored::*;
                eprintln!("{} Failed to save cache: {}", "⚠️".yellow(), e);
            });
        }
        Err(e) => {
            use colored::*;
            eprintln!("{} Failed to serialize cache: {}", "⚠️".yellow(), e);
        }
    }
}

pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
