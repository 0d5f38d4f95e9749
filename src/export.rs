use colored::*;
use std::{fs, path::Path};

use doxidx::index::{IndexTable, writer::write_table};

/// Re-serialize the loaded table, either as JSON for downstream
/// tooling or in the generator's own `searchData` format
pub fn export_index(table: &IndexTable, format: &str, output: Option<&Path>) -> Result<(), String> {
    let body = match format {
        "json" => serde_json::to_string_pretty(table.entries())
            .map_err(|e| format!("Failed to serialize index: {}", e))?,
        "js" => write_table(table.entries()),
        other => {
            return Err(format!(
                "Unknown export format '{}' (expected 'json' or 'js')",
                other
            ));
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &body)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            println!(
                "{} Exported {} entries to {}",
                "✅".green(),
                table.len(),
                path.display()
            );
        }
        None => {
            println!("{}", body);
        }
    }

    Ok(())
}
