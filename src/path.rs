//! Structural paths.
//!
//! A structural path addresses an element from the document root as a
//! sequence of `tag[index]` segments, e.g. `/html[1]/body[1]/ul[1]/li[3]/a[1]`.
//! Indices are 1-based and count preceding element siblings with the same
//! tag (XPath semantics). A segment without an index is a wildcard that
//! matches every same-tag sibling, which is how generic catalog patterns
//! such as `/html[1]/body[1]/ul[1]/li/a[1]` are expressed.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single `tag[index]` step of a structural path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    /// Lowercase tag name.
    pub tag: String,
    /// 1-based position among same-tag siblings; `None` is a wildcard.
    pub index: Option<usize>,
}

impl PathSegment {
    /// Create a concrete segment.
    #[must_use]
    pub fn new(tag: impl Into<String>, index: usize) -> Self {
        Self {
            tag: tag.into(),
            index: Some(index),
        }
    }

    /// Create a wildcard segment matching every sibling with `tag`.
    #[must_use]
    pub fn wildcard(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            index: None,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.index.is_none()
    }

    /// Parse one segment.
    ///
    /// With `strict`, an index that is not a positive integer or `*` is an
    /// error. Otherwise the segment degrades to an index-less segment, which
    /// the tree builder treats as a continuity break.
    fn parse(raw: &str, strict: bool) -> Option<Self> {
        let raw = raw.trim();
        let (tag, index) = match raw.split_once('[') {
            Some((tag, rest)) => {
                let inner = rest.strip_suffix(']');
                let index = match inner {
                    Some("*") => None,
                    Some(n) => match n.trim().parse::<usize>() {
                        Ok(i) if i > 0 => Some(i),
                        _ if strict => return None,
                        _ => None,
                    },
                    None if strict => return None,
                    None => None,
                };
                (tag, index)
            }
            None => (raw, None),
        };

        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')) {
            return None;
        }

        Some(Self {
            tag: tag.to_ascii_lowercase(),
            index,
        })
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{i}]", self.tag),
            None => f.write_str(&self.tag),
        }
    }
}

/// A root-to-node address made of [`PathSegment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructuralPath {
    segments: Vec<PathSegment>,
}

impl StructuralPath {
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse a path, rejecting malformed segments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use catalog_detect::path::StructuralPath;
    ///
    /// let path = StructuralPath::parse("/html[1]/body[1]/ul[1]/li/a[1]")?;
    /// assert_eq!(path.depth(), 5);
    /// assert!(path.segments()[3].is_wildcard());
    /// # Ok::<(), catalog_detect::Error>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let body = raw
            .trim()
            .strip_prefix('/')
            .ok_or_else(|| Error::InvalidPath(raw.to_string()))?;
        if body.is_empty() {
            return Err(Error::InvalidPath(raw.to_string()));
        }

        let segments = body
            .split('/')
            .map(|s| PathSegment::parse(s, true))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::InvalidPath(raw.to_string()))?;

        Ok(Self { segments })
    }

    /// Parse a path produced by a document collaborator.
    ///
    /// Never fails: segments whose index cannot be read lose it, and
    /// segments that cannot be read at all become an index-less `?` step.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let body = raw.trim().trim_start_matches('/');
        let segments = body
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| PathSegment::parse(s, false).unwrap_or_else(|| PathSegment::wildcard("?")))
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Positional index of the segment at `pos` (0-based).
    #[must_use]
    pub fn index_at(&self, pos: usize) -> Option<usize> {
        self.segments.get(pos).and_then(|s| s.index)
    }

    /// The first `len` segments.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// The segments after the first `len`, as a relative path.
    #[must_use]
    pub fn suffix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[len.min(self.segments.len())..].to_vec(),
        }
    }

    /// Length of the longest shared prefix of concrete, identical segments.
    #[must_use]
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b && a.index.is_some())
            .count()
    }

    /// True if any segment has one of the given tags.
    #[must_use]
    pub fn contains_any_tag(&self, tags: &[&str]) -> bool {
        self.segments.iter().any(|s| tags.contains(&s.tag.as_str()))
    }

    /// The path with every index erased, e.g. `/html/body/ul/li/a`.
    ///
    /// Links whose normalized paths are equal have the same shape.
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            out.push('/');
            out.push_str(&seg.tag);
        }
        out
    }

    /// Generic pattern covering every path in `paths`.
    ///
    /// Paths must share the same shape; indices that differ between them
    /// become wildcards. Returns `None` for an empty input or paths of
    /// different shapes.
    #[must_use]
    pub fn generic<'a, I>(paths: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a StructuralPath>,
    {
        let mut iter = paths.into_iter();
        let mut generic = iter.next()?.clone();

        for path in iter {
            if path.depth() != generic.depth() {
                return None;
            }
            for (g, s) in generic.segments.iter_mut().zip(&path.segments) {
                if g.tag != s.tag {
                    return None;
                }
                if g.index != s.index {
                    g.index = None;
                }
            }
        }

        Some(generic)
    }

    /// Split after the last wildcard segment.
    ///
    /// Returns the container path (every iterated node) and the path of the
    /// link relative to one container. A path without wildcards addresses a
    /// single container and has an empty relative part.
    #[must_use]
    pub fn split_iteration(&self) -> (Self, Self) {
        let cut = self
            .segments
            .iter()
            .rposition(PathSegment::is_wildcard)
            .map_or(self.segments.len(), |i| i + 1);
        (self.prefix(cut), self.suffix(cut))
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            write!(f, "/{seg}")?;
        }
        Ok(())
    }
}

impl FromStr for StructuralPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
