//! # catalog-detect
//!
//! Detects the repeating article catalog of a news index page and extracts
//! its entries.
//!
//! Index pages list articles as structurally repeating blocks: a `<ul>` of
//! `<li>` rows, a grid of cards, a table of headlines. This library finds
//! that block without site-specific rules, returns its links with titles
//! and publish dates, and emits a generic structural pattern that can be
//! stored and replayed cheaply on later versions of the page.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_detect::analyze;
//!
//! let mut html = String::from("<html><body><nav><a href='/'>Home</a></nav><ul>");
//! for i in 1..=5 {
//!     html.push_str(&format!("<li><a href='/news/{i}'>Story number {i}</a> 2024-05-0{i}</li>"));
//! }
//! html.push_str("</ul></body></html>");
//!
//! let result = analyze(&html)?;
//! assert_eq!(result.items.len(), 5);
//! assert_eq!(result.items[0].published_raw.as_deref(), Some("2024-05-01"));
//! assert_eq!(result.pattern.as_deref(), Some("/html[1]/body[1]/ul[1]/li/a[1]"));
//! # Ok::<(), catalog_detect::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Link extraction**: every navigable anchor with its structural path
//! - **Grouping**: links sharing a path shape, outside header/footer/nav
//! - **Link trees**: nested containers inferred from contiguous indices
//! - **Date annotation and pruning**: dated subtrees win, noise columns go
//! - **Ranking**: blocks scored by link text, dated blocks preferred
//! - **Materialization**: the winning pattern re-queried into catalog items

mod analyzer;
mod error;
mod options;
mod patterns;
mod result;

/// Document adapter: structural-path queries over `dom_query` documents.
pub mod dom;

/// Structural paths (`/html[1]/body[1]/ul[1]/li/a[1]`).
pub mod path;

/// Anchor extraction and grouping by path shape.
pub mod links;

/// Link trees inferred from repeating structure.
pub mod tree;

/// Publish-date extraction and parsing.
pub mod date;

/// Noise pruning of link trees.
pub mod prune;

/// Candidate blocks, scoring and ranking.
pub mod block;

/// Catalog item materialization from a generic pattern.
pub mod catalog;

/// URL utilities for href filtering and resolution.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use path::StructuralPath;
pub use result::{CatalogItem, CatalogResult};

use dom::{Document, PathDocument};

/// Detects the catalog of an HTML document using default options.
///
/// # Returns
///
/// The catalog entries in document order plus the winning pattern. A page
/// without a catalog yields an empty result, not an error.
pub fn analyze(html: &str) -> Result<CatalogResult> {
    analyze_with_options(html, &Options::default())
}

/// Detects the catalog of an HTML document with custom options.
///
/// Fails only when `options` are out of range.
///
/// # Example
///
/// ```rust
/// use catalog_detect::{analyze_with_options, Options};
///
/// let options = Options {
///     min_link_count: 3,
///     base_url: Some("https://news.example.com/".to_string()),
///     ..Options::default()
/// };
/// let html = "<ul><li><a href='a'>First headline</a></li>\
///             <li><a href='b'>Second headline</a></li>\
///             <li><a href='c'>Third headline</a></li></ul>";
/// let result = analyze_with_options(html, &options)?;
/// assert_eq!(result.items[2].url, "https://news.example.com/c");
/// # Ok::<(), catalog_detect::Error>(())
/// ```
pub fn analyze_with_options(html: &str, options: &Options) -> Result<CatalogResult> {
    options.validate()?;
    let document = Document::from(html);
    Ok(analyzer::detect(&document, options))
}

/// Detects the catalog of an already parsed document.
pub fn analyze_document<D: PathDocument>(doc: &D, options: &Options) -> Result<CatalogResult> {
    options.validate()?;
    Ok(analyzer::detect(doc, options))
}

/// Extracts catalog entries using a saved pattern, skipping detection.
///
/// `path` is a generic structural path as returned in
/// [`CatalogResult::pattern`]. Rows added since the pattern was detected
/// are picked up as long as the page keeps its layout.
///
/// # Errors
///
/// [`Error::InvalidPath`] when `path` cannot be parsed, and
/// [`Error::InvalidOptions`] for out-of-range options.
///
/// # Example
///
/// ```rust
/// use catalog_detect::{extract_with_path, Options};
///
/// let html = "<ul><li><a href='/a'>Alpha</a> 2024-01-02</li><li><a href='/b'>Beta</a></li></ul>";
/// let items = extract_with_path(html, "/html[1]/body[1]/ul[1]/li/a[1]", &Options::default())?;
/// assert_eq!(items.len(), 2);
/// assert!(items[0].has_date);
/// assert!(!items[1].has_date);
/// # Ok::<(), catalog_detect::Error>(())
/// ```
pub fn extract_with_path(html: &str, path: &str, options: &Options) -> Result<Vec<CatalogItem>> {
    let pattern = StructuralPath::parse(path)?;
    options.validate()?;
    let document = Document::from(html);
    Ok(analyzer::replay(&document, &pattern, options))
}

/// Extracts catalog entries of an already parsed document using a saved pattern.
pub fn extract_document_with_path<D: PathDocument>(
    doc: &D,
    path: &str,
    options: &Options,
) -> Result<Vec<CatalogItem>> {
    let pattern = StructuralPath::parse(path)?;
    options.validate()?;
    Ok(analyzer::replay(doc, &pattern, options))
}
