use colored::*;
use std::fs;

use crate::config::Config;

pub fn clean(config: &Config) -> Result<(), String> {
    if config.cache_file.exists() {
        fs::remove_file(&config.cache_file)
            .map_err(|e| format!("Failed to remove cache file: {}", e))?;
        println!(
            "{} Removed parse cache: {}",
            "🧹".green(),
            config.cache_file.display()
        );
    } else {
        println!("{} Nothing to clean", "✨".cyan());
    }

    Ok(())
}
