use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One searchable symbol occurrence from a generated search table.
///
/// `key` is the lower-cased search key with the generator's `_N`
/// sequence suffix stripped; it is not unique (overload sets and
/// same-named symbols in different scopes share a key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: String,
    pub label: String,
    pub target_path: String,
    pub anchor: String,
    #[serde(default)]
    pub qualifier: Option<String>,
}

impl IndexEntry {
    /// Relative URL of the documented symbol (`path#anchor`).
    ///
    /// This pairing comes straight from the generator and must stay
    /// bit-exact for links to resolve on the hosting site.
    pub fn target(&self) -> String {
        if self.anchor.is_empty() {
            self.target_path.clone()
        } else {
            format!("{}#{}", self.target_path, self.anchor)
        }
    }
}

/// Index for fast lookups over an ordered entry sequence
#[derive(Debug, Clone)]
pub struct IndexTable {
    /// Entries in original generation order
    entries: Vec<IndexEntry>,
    /// Map from key to entry indices, each list in table order
    keys: HashMap<String, Vec<usize>>,
}

impl IndexTable {
    /// Build an index from parsed entries
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        let mut keys: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            keys.entry(entry.key.clone()).or_default().push(idx);
        }

        IndexTable { entries, keys }
    }

    /// All entries in original table order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct search keys
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Exact key lookup (case-insensitive). An absent key is an empty
    /// result, not an error.
    pub fn get(&self, key: &str) -> Vec<&IndexEntry> {
        let key = key.to_lowercase();
        self.keys
            .get(&key)
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Case-insensitive prefix query.
    ///
    /// Returns a lazy iterator over matching entries in table order;
    /// ties keep the generator's ordering. Re-running the same query
    /// yields the same sequence since the table is immutable.
    pub fn query<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(move |entry| entry.key.starts_with(&query))
    }

    /// Search for entries whose label contains the query, used for
    /// "did you mean" suggestions
    pub fn search(&self, query: &str) -> Vec<&IndexEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.label.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Keys with more than one entry, most crowded first
    pub fn overloaded_keys(&self) -> Vec<(&str, usize)> {
        let mut overloaded: Vec<(&str, usize)> = self
            .keys
            .iter()
            .filter(|(_, indices)| indices.len() > 1)
            .map(|(key, indices)| (key.as_str(), indices.len()))
            .collect();
        overloaded.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        overloaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, label: &str, anchor: &str) -> IndexEntry {
        IndexEntry {
            key: key.to_string(),
            label: label.to_string(),
            target_path: "../df/dc5/classSMA.html".to_string(),
            anchor: anchor.to_string(),
            qualifier: None,
        }
    }

    fn sample_table() -> IndexTable {
        IndexTable::build(vec![
            entry("sma", "SMA", "a19021bbd"),
            entry("sma", "SMA", "a24510833"),
            entry("sos2tf", "sos2tf", "a179c9152"),
            entry("sosfilter", "SOSFilter", "ac0f70826"),
        ])
    }

    #[test]
    fn test_exact_lookup() {
        let table = sample_table();
        assert_eq!(table.get("sma").len(), 2);
        assert_eq!(table.get("SMA").len(), 2, "lookup should case-fold");
        assert!(table.get("missing").is_empty(), "absent key is empty, not an error");
    }

    #[test]
    fn test_prefix_query_order() {
        let table = sample_table();
        let anchors: Vec<&str> = table.query("sma").map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["a19021bbd", "a24510833"], "table order is preserved");
    }

    #[test]
    fn test_prefix_query_is_prefix_not_substring() {
        let table = sample_table();
        let labels: Vec<&str> = table.query("sos").map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["sos2tf", "SOSFilter"]);
        assert_eq!(table.query("osfilter").count(), 0);
    }

    #[test]
    fn test_query_restartable() {
        let table = sample_table();
        let first: Vec<&IndexEntry> = table.query("s").collect();
        let second: Vec<&IndexEntry> = table.query("s").collect();
        assert_eq!(first, second, "re-running a query yields the same sequence");
    }

    #[test]
    fn test_empty_query_matches_all() {
        let table = sample_table();
        assert_eq!(table.query("").count(), table.len());
    }

    #[test]
    fn test_overloaded_keys() {
        let table = sample_table();
        assert_eq!(table.overloaded_keys(), vec![("sma", 2)]);
    }

    #[test]
    fn test_target_join() {
        let table = sample_table();
        let first = &table.entries()[0];
        assert_eq!(first.target(), "../df/dc5/classSMA.html#a19021bbd");
    }
}
