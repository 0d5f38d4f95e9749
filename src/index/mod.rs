//! Doxygen search-index module
//!
//! This module parses the `var searchData=[...]` tables that Doxygen
//! writes under `search/*.js` and builds an in-memory index over them.
//! The table is immutable after construction; every query is a pure
//! read over the original entry order.
//!
//! A sample index is compressed at compile time and decompressed on
//! first access, so the tool works out of the box without a generated
//! documentation tree.
//!
//! # Usage
//!
//! ```rust
//! use doxidx::index::get_index;
//!
//! // Get the bundled sample index
//! let index = get_index();
//!
//! // Prefix query, case-insensitive, in table order
//! for entry in index.query("sma") {
//!     println!("{} -> {}#{}", entry.label, entry.target_path, entry.anchor);
//! }
//! ```

mod embedded;
pub mod parser;
mod types;
pub mod writer;

pub use embedded::get_index;
pub use parser::{ParseError, parse_bundle, parse_str};
pub use types::{IndexEntry, IndexTable};
