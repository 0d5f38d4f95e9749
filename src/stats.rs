use colored::*;

use doxidx::index::IndexTable;

pub fn show_stats(table: &IndexTable) -> Result<(), String> {
    let qualified = table
        .entries()
        .iter()
        .filter(|entry| entry.qualifier.is_some())
        .count();
    let pages: std::collections::HashSet<&str> = table
        .entries()
        .iter()
        .map(|entry| entry.target_path.as_str())
        .collect();

    println!("\n{} Index statistics:\n", "📊".cyan());
    println!("  {} {} entries", "•".blue(), table.len().to_string().bold());
    println!(
        "  {} {} distinct keys",
        "•".blue(),
        table.key_count().to_string().bold()
    );
    println!("  {} {} target pages", "•".blue(), pages.len().to_string().bold());
    println!(
        "  {} {} entries carry a qualifier",
        "•".blue(),
        qualified.to_string().bold()
    );

    let overloaded = table.overloaded_keys();
    if !overloaded.is_empty() {
        println!(
            "\n{} Most crowded keys ({} keys have multiple locations):\n",
            "📚".cyan(),
            overloaded.len()
        );
        for (key, count) in overloaded.iter().take(10) {
            println!("  {} {} ({} locations)", "•".cyan(), key.green(), count);
        }
        if overloaded.len() > 10 {
            println!("\n  ... and {} more", overloaded.len() - 10);
        }
    }
    println!();

    Ok(())
}
