//! Result types for catalog detection output.
//!
//! This module defines the catalog entries produced by detection or pattern
//! replay, and the overall detection result.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry of a detected catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Concrete structural path of the link element.
    pub path: String,

    /// Link target; absolute when a base URL is configured.
    pub url: String,

    /// Whitespace-collapsed link text.
    pub title: String,

    /// Whitespace-collapsed text of the whole entry (the row container).
    pub full_text: String,

    /// Parsed publish date, when the raw date is a valid calendar value.
    pub published: Option<NaiveDateTime>,

    /// Date substring found in `full_text`, verbatim.
    pub published_raw: Option<String>,

    /// Whether a raw date was found.
    pub has_date: bool,
}

/// Result of catalog detection on one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResult {
    /// Catalog entries in document order.
    pub items: Vec<CatalogItem>,

    /// Generic path of the winning block, e.g. `/html[1]/body[1]/ul[1]/li/a[1]`.
    ///
    /// Store it to replay detection cheaply on later versions of the page.
    /// `None` when no catalog was found.
    pub pattern: Option<String>,
}

impl CatalogResult {
    /// True when no catalog entry was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
