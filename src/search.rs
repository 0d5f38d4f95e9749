//! Query commands over a loaded search index

use colored::*;
use std::io::{self, Write};

use doxidx::index::{IndexEntry, IndexTable};

use crate::error_format::{fit_to_width, get_terminal_width};
use crate::syntax::highlight_cpp_code;

/// Prefix query against the index, with suggestions when nothing matches
pub fn search_symbols(
    table: &IndexTable,
    query: &str,
    max_results: usize,
    verbose: bool,
) -> Result<(), String> {
    let matches: Vec<&IndexEntry> = table.query(query).collect();

    if matches.is_empty() {
        let suggestions = get_key_suggestions(table, query);
        if suggestions.is_empty() {
            return Err(format!("No symbols matching '{}'", query));
        }
        println!(
            "{} No match for '{}'. Did you mean one of these?\n",
            "ℹ️".blue(),
            query
        );
        for suggestion in suggestions.iter().take(5) {
            println!("  {} {}", "•".cyan(), suggestion.green());
        }
        return Ok(());
    }

    println!("\n{} Found {} result(s) for '{}':\n", "🔍".cyan(), matches.len(), query);

    let groups = group_by_symbol(&matches);
    for group in groups.iter().take(max_results) {
        display_symbol(group, verbose);
    }
    if groups.len() > max_results {
        println!("  ... and {} more symbol(s)", groups.len() - max_results);
    }

    println!(
        "\n{} Total: {} symbol(s), {} location(s)",
        "✓".green(),
        groups.len().to_string().bold(),
        matches.len().to_string().bold()
    );

    Ok(())
}

/// Exact key lookup; an absent key reports "no results", not a failure
pub fn lookup_key(table: &IndexTable, key: &str) -> Result<(), String> {
    let matches = table.get(key);

    if matches.is_empty() {
        println!("{} No entries under key '{}'", "ℹ️".blue(), key);
        return Ok(());
    }

    println!("\n{} Key '{}':\n", "📚".cyan(), key.green().bold());
    for group in group_by_symbol(&matches) {
        display_symbol(group, true);
    }

    Ok(())
}

/// Interactive search mode
pub fn interactive_search(table: &IndexTable, max_results: usize) -> Result<(), String> {
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("{}", "║   Doxygen Search Index Explorer           ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
    print_interactive_help();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", "doxidx>".blue().bold());
        stdout.flush().map_err(|e| e.to_string())?;

        let mut input = String::new();
        stdin.read_line(&mut input).map_err(|e| e.to_string())?;

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "quit" | "exit" | "q" => {
                println!("Goodbye! 👋");
                break;
            }
            "find" => {
                if parts.len() < 2 {
                    println!("{} Usage: find <prefix>", "⚠️".yellow());
                    continue;
                }
                let _ = search_symbols(table, parts[1], max_results, false);
            }
            "key" => {
                if parts.len() < 2 {
                    println!("{} Usage: key <key>", "⚠️".yellow());
                    continue;
                }
                let _ = lookup_key(table, parts[1]);
            }
            "stats" => {
                let _ = crate::stats::show_stats(table);
            }
            "check" => {
                if let Err(e) = crate::check::check_index(table, false) {
                    println!("{} {}", "❌".red(), e.red());
                }
            }
            "help" | "?" => {
                print_interactive_help();
            }
            _ => {
                // Default to a prefix search
                let _ = search_symbols(table, input, max_results, false);
            }
        }
        println!();
    }

    Ok(())
}

fn print_interactive_help() {
    println!("Commands:");
    println!("  {} <prefix>  - Prefix search over symbol keys", "find".green());
    println!("  {} <key>     - Exact key lookup", "key".green());
    println!("  {}          - Index statistics", "stats".green());
    println!("  {}          - Verify index invariants", "check".green());
    println!("  {}           - Exit", "quit".green());
    println!();
}

/// Split matches into runs sharing (key, label), preserving table order
fn group_by_symbol<'a, 'e>(matches: &'a [&'e IndexEntry]) -> Vec<&'a [&'e IndexEntry]> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < matches.len() {
        let mut j = i;
        while j < matches.len()
            && matches[j].key == matches[i].key
            && matches[j].label == matches[i].label
        {
            j += 1;
        }
        groups.push(&matches[i..j]);
        i = j;
    }
    groups
}

/// Display one symbol and all of its locations
fn display_symbol(group: &[&IndexEntry], verbose: bool) {
    let head = group[0];
    let count_text = if group.len() > 1 {
        format!(" ({} locations)", group.len())
    } else {
        String::new()
    };

    println!(
        "  {} {}{}",
        "▸".cyan(),
        head.label.yellow().bold(),
        count_text.dimmed()
    );

    let width = get_terminal_width().max(40);
    for (idx, entry) in group.iter().enumerate() {
        let is_last = idx == group.len() - 1;
        let prefix = if group.len() > 1 {
            if is_last { "  └─" } else { "  ├─" }
        } else {
            "    "
        };

        // For file-scope symbols the qualifier is the signature; fall
        // back to the label for bare class-member references
        let shown = entry.qualifier.as_deref().unwrap_or(&head.label);
        println!(
            "{} {}",
            prefix.cyan(),
            highlight_cpp_code(&fit_to_width(shown, width.saturating_sub(8)))
        );

        let continuation = if group.len() > 1 && !is_last { "  │  " } else { "     " };
        println!(
            "{}{}",
            continuation.cyan(),
            fit_to_width(&entry.target(), width.saturating_sub(8)).dimmed()
        );

        if verbose {
            println!("{}key: {}", continuation.cyan(), entry.key.bright_black());
        }
    }
    println!();
}

/// Get suggestions for a query that matched nothing: case-insensitive
/// label fragments first, then close keys by edit distance
pub fn get_key_suggestions(table: &IndexTable, query: &str) -> Vec<String> {
    let by_label: Vec<String> = {
        let mut labels: Vec<String> = table
            .search(query)
            .iter()
            .map(|entry| entry.label.clone())
            .collect();
        labels.dedup();
        labels
    };
    if !by_label.is_empty() {
        return by_label;
    }

    let query_lower = query.to_lowercase();
    let mut scored: Vec<(usize, &str)> = Vec::new();
    let mut seen_keys: Vec<&str> = Vec::new();
    for entry in table.entries() {
        if seen_keys.contains(&entry.key.as_str()) {
            continue;
        }
        seen_keys.push(&entry.key);
        let distance = edit_distance(&query_lower, &entry.key);
        if distance <= 2 {
            scored.push((distance, &entry.key));
        }
    }

    // Sort by distance (closest first)
    scored.sort_by_key(|(dist, _)| *dist);

    scored
        .into_iter()
        .map(|(_, key)| key.to_string())
        .take(5)
        .collect()
}

/// Calculate simple edit distance between two strings (Levenshtein distance)
fn edit_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(matrix[i - 1][j] + 1, matrix[i][j - 1] + 1),
                matrix[i - 1][j - 1] + cost,
            );
        }
    }

    matrix[len1][len2]
}
