//! Well-formedness checks over a loaded index
//!
//! Verifies the properties the generator is trusted to uphold: keys
//! are case-folded fragments of their labels, targets point at pages,
//! and the table survives a serialize/parse round trip unchanged.

use colored::*;

use doxidx::index::{IndexTable, parse_str, writer::write_table};

pub fn check_index(table: &IndexTable, verbose: bool) -> Result<(), String> {
    println!("{} Checking {} entries...", "🔍".cyan(), table.len());

    let mut problems = Vec::new();

    for (idx, entry) in table.entries().iter().enumerate() {
        if entry.key.is_empty() {
            problems.push(format!("entry #{}: empty search key", idx));
            continue;
        }
        if entry.key.chars().any(|c| c.is_uppercase()) {
            problems.push(format!(
                "entry #{} ('{}'): key is not case-folded",
                idx, entry.key
            ));
        }
        if !entry.label.to_lowercase().contains(&entry.key) {
            problems.push(format!(
                "entry #{} ('{}'): key is not a fragment of label '{}'",
                idx, entry.key, entry.label
            ));
        }
        if entry.target_path.is_empty() {
            problems.push(format!("entry #{} ('{}'): missing target path", idx, entry.key));
        } else if !entry.target_path.ends_with(".html") {
            problems.push(format!(
                "entry #{} ('{}'): target '{}' is not an HTML page",
                idx, entry.key, entry.target_path
            ));
        }
    }

    if verbose {
        println!("  {} Entry fields checked", "✓".green());
    }

    // Round trip: serialize and re-parse must reproduce the exact
    // entry sequence
    let serialized = write_table(table.entries());
    match parse_str(&serialized) {
        Ok(reparsed) if reparsed == table.entries() => {
            if verbose {
                println!("  {} Round trip preserves all {} entries", "✓".green(), table.len());
            }
        }
        Ok(_) => {
            problems.push("round trip changed entry order or content".to_string());
        }
        Err(e) => {
            problems.push(format!("round trip produced unparsable output: {}", e));
        }
    }

    if problems.is_empty() {
        println!(
            "{} Index is well-formed ({} entries, {} keys)",
            "✅".green(),
            table.len(),
            table.key_count()
        );
        Ok(())
    } else {
        for problem in problems.iter().take(20) {
            println!("  {} {}", "✗".red(), problem);
        }
        if problems.len() > 20 {
            println!("  ... and {} more", problems.len() - 20);
        }
        Err(format!("{} problem(s) found", problems.len()))
    }
}
