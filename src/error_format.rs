use colored::*;
use std::path::Path;
use terminal_size::{Width, terminal_size};

use doxidx::index::ParseError;

use crate::syntax::highlight_js_code;

/// Get the current terminal width, defaulting to 80 if unable to detect
pub fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        80 // Default fallback width
    }
}

/// Create a separator line that fits the terminal width
pub fn separator(width: usize) -> String {
    "─".repeat(width.min(120)) // Cap at 120 for very wide terminals
}

/// Shorten a line so it fits the terminal, marking the cut with an ellipsis
pub fn fit_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

/// Render a shard parse failure with source context and a caret,
/// pointing at the offending line/column
pub fn format_parse_error(path: &Path, source: &str, err: &ParseError) -> String {
    let term_width = get_terminal_width();
    let sep_width = (term_width - 2).max(40); // Leave some margin

    let mut formatted = String::new();
    formatted.push_str(&format!(
        "\n{} {}\n",
        "💥".red(),
        "Malformed search index".red().bold()
    ));
    formatted.push_str(&format!("{}\n", separator(sep_width).yellow()));

    formatted.push_str(&format!("  {} {}\n", "📄".cyan(), path.display().to_string().cyan()));
    formatted.push_str(&format!(
        "  {} Line {}, column {}\n",
        "📍".yellow(),
        err.line.to_string().yellow().bold(),
        err.col.to_string().yellow().bold()
    ));
    formatted.push_str(&format!("  {} {}\n", "💬".red(), err.message.white()));

    // Show the offending source line with an aligned caret
    if let Some(line) = source.lines().nth(err.line.saturating_sub(1)) {
        let trimmed = line.trim_start();
        let leading = line.chars().count() - trimmed.chars().count();
        let shown = fit_to_width(trimmed, sep_width.saturating_sub(2));
        formatted.push_str(&format!("\n  {}\n", highlight_js_code(&shown)));

        let offset = err.col.saturating_sub(1).saturating_sub(leading);
        if offset < shown.chars().count() {
            formatted.push_str(&format!("  {}{}\n", " ".repeat(offset), "^".red().bold()));
        }
    }

    formatted.push_str(&format!(
        "\n{} This file does not look like a generated searchData table.\n",
        "💡".cyan()
    ));

    formatted
}
