//! Serializer back to the generated `searchData` format
//!
//! Consecutive entries sharing a (key, label) pair regroup into one
//! row and sequence suffixes are re-assigned in row order, so a parsed
//! table re-serializes to the same shape the generator produced.

use super::types::IndexEntry;

/// Render entries as a `var searchData=[...];` table
pub fn write_table(entries: &[IndexEntry]) -> String {
    let mut rows = Vec::new();
    let mut i = 0;
    let mut seq = 0;

    while i < entries.len() {
        let head = &entries[i];
        let mut j = i;
        let mut targets = Vec::new();
        while j < entries.len() && entries[j].key == head.key && entries[j].label == head.label {
            targets.push(write_target(&entries[j]));
            j += 1;
        }
        rows.push(format!(
            "  ['{}_{}',['{}',{}]]",
            encode_key_escapes(&head.key),
            seq,
            encode_entities(&head.label),
            targets.join(",")
        ));
        seq += 1;
        i = j;
    }

    format!("var searchData=\n[\n{}\n];\n", rows.join(",\n"))
}

fn write_target(entry: &IndexEntry) -> String {
    let url = encode_entities(&entry.target());
    match &entry.qualifier {
        Some(qualifier) => format!("['{}',1,'{}']", url, encode_entities(qualifier)),
        None => format!("['{}',1]", url),
    }
}

/// Re-apply the generator's `_xx` hex escapes to a decoded key
/// (`sos2tf_helper` -> `sos2tf_5fhelper`)
fn encode_key_escapes(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for &b in key.as_bytes() {
        if b.is_ascii_lowercase() || b.is_ascii_digit() {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{:02x}", b));
        }
    }
    out
}

/// Re-encode the characters the generator escapes. The inverse of
/// [`super::parser::decode_entities`] for everything we emit.
fn encode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            c if (c as u32) > 126 => {
                out.push_str(&format!("&#{};", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse_str;
    use super::*;

    const SHARD: &str = "var searchData=\n[\n  ['setbase_0',['setbase',['../d8/d4b/group__AH__PrintStream.html#gaee7a50f938e43275899e6a531bd69ce4',1,'setbase(uint8_t base):&#160;PrintStream.cpp']]],\n  ['sma_1',['SMA',['../df/dc5/classSMA.html#a19021bbd968dbccaed40cde2ba8c5e69',1,'SMA::SMA(input_t initialValue)'],['../df/dc5/classSMA.html#a245108333934d72b042d3eaab85e76fe',1,'SMA::SMA()=default']]],\n  ['sos2tf_2',['sos2tf',['../de/da4/group__FilterDesign.html#ga179c91528a04a51f07c5e1d55fb2c468',1,'sos2tf(const SOSCoefficients&lt; T, N &gt; &amp;sos):&#160;SOSFilter.hpp']]]\n];\n";

    #[test]
    fn test_round_trip_preserves_sequence() {
        let entries = parse_str(SHARD).unwrap();
        let serialized = write_table(&entries);
        let reparsed = parse_str(&serialized).unwrap();
        assert_eq!(entries, reparsed, "order and content must survive a round trip");
    }

    #[test]
    fn test_round_trip_is_byte_exact_for_generated_input() {
        let entries = parse_str(SHARD).unwrap();
        assert_eq!(write_table(&entries), SHARD);
    }

    #[test]
    fn test_overloads_regroup_into_one_row() {
        let entries = parse_str(SHARD).unwrap();
        let serialized = write_table(&entries);
        assert_eq!(serialized.matches("['sma_").count(), 1);
        assert_eq!(serialized.lines().count(), SHARD.lines().count());
    }

    #[test]
    fn test_escaped_key_round_trip() {
        let src = "var searchData=\n[\n  ['supports_5frange_0',['supports_range',['../d7/d40/classEMA.html#a48b76756871917356a955ca3ba54cbec',1,'EMA']]]\n];\n";
        let entries = parse_str(src).unwrap();
        assert_eq!(entries[0].key, "supports_range");
        assert_eq!(write_table(&entries), src);
    }

    #[test]
    fn test_encode_entities() {
        assert_eq!(
            encode_entities("sos2tf(const SOSCoefficients< T, N > &sos):\u{a0}SOSFilter.hpp"),
            "sos2tf(const SOSCoefficients&lt; T, N &gt; &amp;sos):&#160;SOSFilter.hpp"
        );
        assert_eq!(encode_entities("it's"), "it&#39;s");
        assert_eq!(encode_entities("plain"), "plain");
    }

    #[test]
    fn test_empty_table() {
        let serialized = write_table(&[]);
        assert!(parse_str(&serialized).unwrap().is_empty());
    }
}
