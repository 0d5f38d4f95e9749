use colored::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("./docs")
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("./doxidx-cache.json")
}

fn default_max_results() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            cache_file: default_cache_file(),
            max_results: default_max_results(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = PathBuf::from("doxidx.toml");

        if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        return config;
                    }
                    Err(e) => {
                        eprintln!("{} Failed to parse doxidx.toml: {}", "⚠️".yellow(), e);
                        eprintln!("   Using default configuration");
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read doxidx.toml: {}", "⚠️".yellow(), e);
                    eprintln!("   Using default configuration");
                }
            }
        }

        Config::default()
    }
}
