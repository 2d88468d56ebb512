//! Identity-key normalization for paper titles and author names.
//!
//! ## Canonical Key Specification
//!
//! ```text
//! normalize_key(text) = collapse_whitespace(trim(normalize_newlines(text)))
//! ```
//!
//! Where:
//! - `normalize_newlines`: CRLF → LF, CR → LF
//! - `trim`: Remove leading and trailing whitespace
//! - `collapse_whitespace`: Every inner run of whitespace becomes one space
//!
//! Case and punctuation are preserved. Two names that differ only in case
//! are two different authors.

/// Version of the key normalization rules.
///
/// Increment this when the normalization changes. Snapshots taken under a
/// different version are not comparable.
pub const KEY_NORMALIZATION_VERSION: &str = "1.0.0";

/// Normalize an identity string (title or author name).
///
/// # Example
///
/// ```rust
/// use coauthor_graph_kernel::normalize::normalize_key;
///
/// assert_eq!(normalize_key("  Graph\r\n  Mining "), "Graph Mining");
/// ```
pub fn normalize_key(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a descriptive (non-identity) field: trim only.
pub fn normalize_field(text: &str) -> String {
    text.trim().to_string()
}

/// Whether a raw string normalizes to an empty key.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
