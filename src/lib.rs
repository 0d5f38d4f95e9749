//! doxidx - Doxygen search-index toolkit
//!
//! Loads generated `searchData` tables into an immutable symbol index
//! with case-insensitive prefix queries.

pub mod index;

// Re-export commonly used types
pub use index::{IndexEntry, IndexTable, get_index};
