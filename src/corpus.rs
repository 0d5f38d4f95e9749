use colored::*;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use doxidx::index::{IndexTable, get_index, parse_str};

use crate::cache::{CacheEntry, compute_hash, load_cache, save_cache};
use crate::config::Config;
use crate::error_format::format_parse_error;

#[derive(Debug)]
pub struct LoadContext {
    pub config: Config,
    pub verbose: bool,
    pub force: bool,
}

/// Resolve the index to operate on: an explicit `--dir`, the
/// configured documentation tree, or the bundled sample index
pub fn load_table(ctx: &LoadContext, dir_override: Option<&Path>) -> Result<IndexTable, String> {
    if let Some(dir) = dir_override {
        return load_dir(ctx, dir);
    }
    if ctx.config.docs_dir.exists() {
        return load_dir(ctx, &ctx.config.docs_dir);
    }
    if ctx.verbose {
        println!(
            "{} No documentation tree at {}, using the bundled sample index",
            "ℹ️".blue(),
            ctx.config.docs_dir.display()
        );
    }
    Ok(get_index().clone())
}

/// Load every search-index shard under a documentation tree into one
/// table. Mirrored duplicate shards collapse to a single copy.
pub fn load_dir(ctx: &LoadContext, root: &Path) -> Result<IndexTable, String> {
    if !root.exists() {
        return Err(format!("Directory not found: {}", root.display()));
    }

    let shards = discover_shards(root);
    if shards.is_empty() {
        return Err(format!(
            "No search index found under {} (expected search/*.js shards)",
            root.display()
        ));
    }

    let mut cache = load_cache(&ctx.config.cache_file);
    let mut seen_hashes: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();
    let mut loaded = 0;
    let mut duplicates = 0;
    let mut from_cache = 0;

    for path in &shards {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        // The search directory also holds the viewer's own scripts
        // (search.js, searchdata.js); only searchData tables count
        if !is_search_data(&content) {
            if ctx.verbose {
                println!("  {} Skipped {} (not a search table)", "·".bright_black(), path.display());
            }
            continue;
        }

        let hash = compute_hash(&content);
        if !seen_hashes.insert(hash.clone()) {
            duplicates += 1;
            if ctx.verbose {
                println!(
                    "  {} Skipped {} (mirrored duplicate)",
                    "✓".green(),
                    path.display()
                );
            }
            continue;
        }

        let path_key = path.display().to_string();
        let cached = (!ctx.force)
            .then(|| cache.get(&path_key))
            .flatten()
            .filter(|entry| entry.hash == hash);

        let parsed = match cached {
            Some(entry) => {
                from_cache += 1;
                entry.entries.clone()
            }
            None => {
                let parsed = parse_str(&content)
                    .map_err(|e| format_parse_error(path, &content, &e))?;
                cache.insert(
                    path_key,
                    CacheEntry {
                        hash,
                        entries: parsed.clone(),
                    },
                );
                parsed
            }
        };

        if ctx.verbose {
            println!(
                "  {} {} ({} entries)",
                "⚡".yellow(),
                path.display(),
                parsed.len()
            );
        }
        entries.extend(parsed);
        loaded += 1;
    }

    save_cache(&ctx.config.cache_file, &cache);

    if entries.is_empty() {
        return Err(format!(
            "No search entries found under {}",
            root.display()
        ));
    }

    if ctx.verbose {
        println!(
            "{} Loaded {} entries from {} shard(s) ({} mirrored duplicates collapsed, {} from cache)",
            "✅".green(),
            entries.len(),
            loaded,
            duplicates,
            from_cache
        );
    }

    Ok(IndexTable::build(entries))
}

/// Recursively collect `*.js` files under any `search` directory, in
/// sorted path order so repeated loads are identical
fn discover_shards(root: &Path) -> Vec<PathBuf> {
    let mut shards = Vec::new();
    walk(root, false, &mut shards);
    shards.sort();
    shards
}

fn walk(dir: &Path, in_search_dir: bool, shards: &mut Vec<PathBuf>) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };

    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let is_search = in_search_dir
                || path
                    .file_name()
                    .is_some_and(|name| name == "search");
            walk(&path, is_search, shards);
        } else if in_search_dir
            && path.extension().is_some_and(|ext| ext == "js")
        {
            shards.push(path);
        }
    }
}

fn is_search_data(content: &str) -> bool {
    content.trim_start().starts_with("var searchData")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process;

    const SHARD: &str = "var searchData=\n[\n  ['sma_0',['SMA',['../df/dc5/classSMA.html#a19021bbd968dbccaed40cde2ba8c5e69',1,'SMA::SMA(input_t initialValue)'],['../df/dc5/classSMA.html#a245108333934d72b042d3eaab85e76fe',1,'SMA::SMA()=default']]]\n];\n";
    const UI_SCRIPT: &str = "function SearchBox(name, resultsPath) { this.name = name; }\n";

    struct TempTree {
        root: PathBuf,
    }

    impl TempTree {
        fn new(tag: &str) -> Self {
            let root = std::env::temp_dir().join(format!("doxidx-{}-{}", tag, process::id()));
            let _ = fs::remove_dir_all(&root);
            fs::create_dir_all(&root).unwrap();
            TempTree { root }
        }

        fn write(&self, rel: &str, content: &str) {
            let path = self.root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn ctx(&self) -> LoadContext {
            LoadContext {
                config: Config {
                    docs_dir: self.root.clone(),
                    cache_file: self.root.join("cache.json"),
                    max_results: 20,
                },
                verbose: false,
                force: false,
            }
        }
    }

    impl Drop for TempTree {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    #[test]
    fn test_mirrored_duplicates_collapse() {
        let tree = TempTree::new("mirror");
        // Same shard generated under two directory trees
        tree.write("Doxygen/search/functions_10.js", SHARD);
        tree.write("docs/Doxygen/search/functions_10.js", SHARD);

        let table = load_dir(&tree.ctx(), &tree.root).unwrap();
        assert_eq!(table.len(), 2, "duplicate copy must not double the entries");
    }

    #[test]
    fn test_ui_scripts_are_skipped() {
        let tree = TempTree::new("uiscript");
        tree.write("search/functions_10.js", SHARD);
        tree.write("search/search.js", UI_SCRIPT);

        let table = load_dir(&tree.ctx(), &tree.root).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_is_idempotent() {
        let tree = TempTree::new("idempotent");
        tree.write("search/functions_10.js", SHARD);

        let ctx = tree.ctx();
        let first = load_dir(&ctx, &tree.root).unwrap();
        // Second load comes from the parse cache
        let second = load_dir(&ctx, &tree.root).unwrap();
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn test_missing_index_is_an_error() {
        let tree = TempTree::new("empty");
        tree.write("README.md", "no docs here");
        assert!(load_dir(&tree.ctx(), &tree.root).is_err());
    }

    #[test]
    fn test_files_outside_search_dirs_are_ignored() {
        let tree = TempTree::new("stray");
        tree.write("search/functions_10.js", SHARD);
        tree.write("js/menu.js", UI_SCRIPT);

        let table = load_dir(&tree.ctx(), &tree.root).unwrap();
        assert_eq!(table.len(), 2);
    }
}
