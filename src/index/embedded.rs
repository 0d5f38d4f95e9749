use flate2::read::GzDecoder;
use lazy_static::lazy_static;
use std::io::Read;

use super::parser::parse_bundle;
use super::types::IndexTable;

// Embed the compressed sample index at compile time
static COMPRESSED_INDEX: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/searchdata.js.gz"));

lazy_static! {
    /// Bundled sample index, parsed on first access
    pub static ref INDEX: IndexTable = load_index();
}

/// Decompress the embedded shards and build the index
fn load_index() -> IndexTable {
    let mut decoder = GzDecoder::new(COMPRESSED_INDEX);
    let mut source = String::new();
    decoder
        .read_to_string(&mut source)
        .expect("Failed to decompress bundled search index");

    let entries =
        parse_bundle(&source).expect("Failed to parse bundled search index");

    IndexTable::build(entries)
}

/// Get a reference to the bundled sample index
pub fn get_index() -> &'static IndexTable {
    &INDEX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_load() {
        let index = get_index();
        assert!(!index.is_empty(), "Bundled index should contain entries");
        assert!(index.key_count() > 0, "Key map should not be empty");
    }

    #[test]
    fn test_load_idempotent() {
        let first = load_index();
        let second = load_index();
        assert_eq!(
            first.entries(),
            second.entries(),
            "Loading twice yields identical, order-preserving tables"
        );
    }

    #[test]
    fn test_sma_constructors() {
        let index = get_index();

        let matches: Vec<_> = index.query("sma").collect();
        assert_eq!(matches.len(), 2, "sma should resolve to the two constructors");
        assert!(matches.iter().all(|e| e.label == "SMA"));
        assert_ne!(
            matches[0].anchor, matches[1].anchor,
            "overloads carry distinct anchors"
        );
    }

    #[test]
    fn test_sosfilter_single_entry() {
        let index = get_index();

        let matches: Vec<_> = index.query("sosfilter").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "SOSFilter");
    }

    #[test]
    fn test_query_case_insensitive() {
        let index = get_index();

        let lower: Vec<_> = index.query("sma").collect();
        let upper: Vec<_> = index.query("SMA").collect();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_prefix_matching() {
        let index = get_index();

        let matches: Vec<_> = index.query("send").collect();
        assert!(!matches.is_empty(), "Should match send, sendAll, sendDigit, ...");
        assert!(matches.iter().all(|e| e.key.starts_with("send")));

        assert_eq!(index.query("definitely-not-present").count(), 0);
    }

    #[test]
    fn test_keys_are_case_folded_label_fragments() {
        let index = get_index();

        for entry in index.entries() {
            assert!(
                !entry.key.is_empty(),
                "every entry carries a search key"
            );
            assert!(
                entry.label.to_lowercase().contains(&entry.key),
                "key '{}' should be a case-folded fragment of label '{}'",
                entry.key,
                entry.label
            );
        }
    }

    #[test]
    fn test_exact_lookup() {
        let index = get_index();

        let set = index.get("set");
        assert_eq!(set.len(), 3, "set has three locations (BitArray x2, LEDs)");
        assert!(index.get("nonexistent").is_empty());
    }
}
