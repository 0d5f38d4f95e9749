use colored::*;
use std::{fs, path::PathBuf};

pub fn init_config(force: bool) -> Result<(), String> {
    let config_path = PathBuf::from("doxidx.toml");

    if config_path.exists() && !force {
        return Err("doxidx.toml already exists. Use --force to overwrite.".to_string());
    }

    let template = r#"# doxidx Configuration File

# Root of the generated documentation tree to scan for search/*.js
# shards. When this directory is absent, the bundled sample index is
# used instead.
docs_dir = "./docs"

# Location of the parse cache
cache_file = "./doxidx-cache.json"

# Maximum number of symbols shown per search
max_results = 20
"#;

    fs::write(&config_path, template)
        .map_err(|e| format!("Failed to create doxidx.toml: {}", e))?;

    println!("{} Created doxidx.toml", "✅".green());
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} docs_dir = \"./docs\"", "•".blue());
    println!("  {} cache_file = \"./doxidx-cache.json\"", "•".blue());
    println!("  {} max_results = 20", "•".blue());
    println!(
        "\n{}",
        "Edit doxidx.toml to point at your documentation tree.".cyan()
    );

    Ok(())
}
