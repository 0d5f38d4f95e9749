//! Parser for Doxygen `searchData` tables
//!
//! Each generated shard has the shape:
//!
//! ```text
//! var searchData=
//! [
//!   ['sma_28',['SMA',['../df/dc5/classSMA.html#a19021bbd',1,'SMA::SMA(input_t initialValue)']]],
//!   ...
//! ];
//! ```
//!
//! Every target tuple becomes one [`IndexEntry`]; the `_N` sequence
//! suffix on keys is the generator's row counter and is stripped.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

use super::types::IndexEntry;

/// Parse failure with the source position it occurred at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.col, self.message)
    }
}

/// Parse a single `var searchData=[...];` table
pub fn parse_str(src: &str) -> Result<Vec<IndexEntry>, ParseError> {
    let mut cur = Cursor::new(src);
    let entries = parse_table(&mut cur)?;
    cur.skip_ws();
    if !cur.at_end() {
        return Err(cur.err("trailing data after search table"));
    }
    Ok(entries)
}

/// Parse a bundle of concatenated tables (multiple shards joined into
/// one input, as produced by the build script)
pub fn parse_bundle(src: &str) -> Result<Vec<IndexEntry>, ParseError> {
    let mut cur = Cursor::new(src);
    let mut entries = Vec::new();
    cur.skip_ws();
    while !cur.at_end() {
        entries.extend(parse_table(&mut cur)?);
        cur.skip_ws();
    }
    Ok(entries)
}

fn parse_table(cur: &mut Cursor) -> Result<Vec<IndexEntry>, ParseError> {
    cur.skip_ws();
    cur.eat_keyword("var")?;
    cur.skip_ws();
    cur.eat_keyword("searchData")?;
    cur.skip_ws();
    cur.eat(b'=')?;
    cur.skip_ws();
    cur.eat(b'[')?;

    let mut entries = Vec::new();
    loop {
        cur.skip_ws();
        match cur.peek() {
            Some(b']') => {
                cur.bump();
                break;
            }
            Some(b'[') => {
                parse_row(cur, &mut entries)?;
                cur.skip_ws();
                if cur.peek() == Some(b',') {
                    cur.bump();
                }
            }
            _ => return Err(cur.err("expected '[' or ']' in search table")),
        }
    }
    cur.skip_ws();
    cur.eat(b';')?;
    Ok(entries)
}

/// One row: `['key_N',['Label',target,...]]`
fn parse_row(cur: &mut Cursor, entries: &mut Vec<IndexEntry>) -> Result<(), ParseError> {
    cur.eat(b'[')?;
    cur.skip_ws();
    let raw_key = cur.quoted()?;
    let key = decode_key_escapes(strip_sequence_suffix(&raw_key));
    cur.skip_ws();
    cur.eat(b',')?;
    cur.skip_ws();
    cur.eat(b'[')?;
    cur.skip_ws();
    let label = cur.quoted()?;

    loop {
        cur.skip_ws();
        match cur.peek() {
            Some(b',') => {
                cur.bump();
                cur.skip_ws();
                let (target_path, anchor, qualifier) = parse_target(cur)?;
                entries.push(IndexEntry {
                    key: key.clone(),
                    label: label.clone(),
                    target_path,
                    anchor,
                    qualifier,
                });
            }
            Some(b']') => {
                cur.bump();
                break;
            }
            _ => return Err(cur.err("expected ',' or ']' in result list")),
        }
    }
    cur.skip_ws();
    cur.eat(b']')?;
    Ok(())
}

/// One target tuple: `['path#anchor',1,'Qualifier']`, qualifier optional
fn parse_target(cur: &mut Cursor) -> Result<(String, String, Option<String>), ParseError> {
    cur.eat(b'[')?;
    cur.skip_ws();
    let url = cur.quoted()?;
    cur.skip_ws();
    cur.eat(b',')?;
    cur.skip_ws();
    // Flag distinguishing project-local targets from external tag
    // files; always 1 in the data we consume
    cur.number()?;
    cur.skip_ws();
    let qualifier = if cur.peek() == Some(b',') {
        cur.bump();
        cur.skip_ws();
        Some(cur.quoted()?)
    } else {
        None
    };
    cur.skip_ws();
    cur.eat(b']')?;

    let (target_path, anchor) = match url.split_once('#') {
        Some((path, anchor)) => (path.to_string(), anchor.to_string()),
        None => (url, String::new()),
    };
    Ok((target_path, anchor, qualifier))
}

/// Strip the generator's `_N` row counter from a raw key
/// (`sma_28` -> `sma`)
fn strip_sequence_suffix(raw: &str) -> &str {
    match raw.rsplit_once('_') {
        Some((head, tail))
            if !head.is_empty() && !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => raw,
    }
}

/// Decode the generator's `_xx` hex escapes for characters outside
/// `[a-z0-9]` (`sos2tf_5fhelper` -> `sos2tf_helper`)
pub fn decode_key_escapes(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            let high = (bytes[i + 1] as char).to_digit(16).unwrap_or(0) as u8;
            let low = (bytes[i + 2] as char).to_digit(16).unwrap_or(0) as u8;
            out.push(high << 4 | low);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

lazy_static! {
    static ref ENTITY_RE: Regex =
        Regex::new(r"&(?:#(\d+)|#x([0-9a-fA-F]+)|([a-zA-Z]+));").unwrap();
}

/// Decode the HTML entities Doxygen writes into string data
/// (`&amp;`, `&lt;`, `&#160;`, ...). Unknown entities pass through.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            if let Some(dec) = caps.get(1) {
                dec.as_str()
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            } else {
                match &caps[3] {
                    "amp" => "&".to_string(),
                    "lt" => "<".to_string(),
                    "gt" => ">".to_string(),
                    "quot" => "\"".to_string(),
                    "apos" => "'".to_string(),
                    "nbsp" => "\u{a0}".to_string(),
                    _ => caps[0].to_string(),
                }
            }
        })
        .into_owned()
}

/// Byte cursor over the source with line/column tracking
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) {
        if let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else if b & 0xC0 != 0x80 {
                // Count characters, not UTF-8 continuation bytes
                self.col += 1;
            }
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.bump();
        }
    }

    fn err(&self, message: &str) -> ParseError {
        ParseError {
            line: self.line,
            col: self.col,
            message: message.to_string(),
        }
    }

    fn eat(&mut self, expected: u8) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.err(&format!("expected '{}'", expected as char)))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.src[self.pos..].starts_with(keyword) {
            for _ in 0..keyword.len() {
                self.bump();
            }
            Ok(())
        } else {
            Err(self.err(&format!("expected '{}'", keyword)))
        }
    }

    /// Single-quoted string; the generator escapes quotes as entities,
    /// so content never contains a raw `'`
    fn quoted(&mut self) -> Result<String, ParseError> {
        self.eat(b'\'')?;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'\'' {
                let raw = &self.src[start..self.pos];
                self.bump();
                return Ok(decode_entities(raw));
            }
            self.bump();
        }
        Err(self.err("unterminated string"))
    }

    fn number(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.err("expected a number"));
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| self.err("number out of range"))
    }
}
