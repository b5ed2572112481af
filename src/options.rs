//! Configuration options for catalog detection.
//!
//! The `Options` struct carries the tuning knobs of the detector. They are
//! empirically tuned heuristics, so every one of them is exposed rather than
//! hard-coded. Options can be deserialized from JSON to replay a saved
//! configuration; missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Configuration options for catalog detection.
///
/// # Example
///
/// ```rust
/// use catalog_detect::Options;
///
/// let options = Options {
///     min_link_count: 3,
///     base_url: Some("https://news.example.com/world/".to_string()),
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Minimum number of links a catalog block must contain.
    ///
    /// Applied to link groups, to the dated descendants required before
    /// pruning, and to the final blocks.
    ///
    /// Default: `4`
    pub min_link_count: usize,

    /// Minimum text length (characters) of a catalog link.
    ///
    /// Groups whose longest link text is shorter are dropped, columns whose
    /// average text is shorter are pruned, and blocks whose average text per
    /// link is shorter are excluded from ranking.
    ///
    /// Default: `5`
    pub min_text_len: usize,

    /// Relative cutoff for keeping runner-up blocks.
    ///
    /// A block stays in contention when its score exceeds
    /// `top_score * score_threshold`. Contenders whose items all carry a
    /// date are preferred over the top block.
    ///
    /// Default: `0.5`
    pub score_threshold: f64,

    /// URL of the page being analyzed.
    ///
    /// When set, relative hrefs are resolved against it so that catalog
    /// items carry absolute URLs.
    ///
    /// Default: `None`
    pub base_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_link_count: 4,
            min_text_len: 5,
            score_threshold: 0.5,
            base_url: None,
        }
    }
}

impl Options {
    /// Check that every knob is inside its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.min_link_count == 0 {
            return Err(Error::InvalidOptions(
                "min_link_count must be at least 1".to_string(),
            ));
        }
        if !(self.score_threshold > 0.0 && self.score_threshold <= 1.0) {
            return Err(Error::InvalidOptions(format!(
                "score_threshold must be in (0, 1], got {}",
                self.score_threshold
            )));
        }
        if let Some(ref base) = self.base_url {
            if Url::parse(base).is_err() {
                return Err(Error::InvalidOptions(format!("base_url is not a valid URL: {base}")));
            }
        }
        Ok(())
    }

    /// The parsed base URL, if one is configured and valid.
    #[must_use]
    pub fn base(&self) -> Option<Url> {
        self.base_url.as_deref().and_then(|s| Url::parse(s).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.min_link_count, 4);
        assert_eq!(opts.min_text_len, 5);
        assert!((opts.score_threshold - 0.5).abs() < f64::EPSILON);
        assert!(opts.base_url.is_none());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_zero_link_count_rejected() {
        let opts = Options {
            min_link_count: 0,
            ..Options::default()
        };
        assert!(matches!(opts.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_threshold_range() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let opts = Options {
                score_threshold: bad,
                ..Options::default()
            };
            assert!(opts.validate().is_err(), "{bad} should be rejected");
        }

        let opts = Options {
            score_threshold: 1.0,
            ..Options::default()
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let opts = Options {
            base_url: Some("not a url".to_string()),
            ..Options::default()
        };
        assert!(opts.validate().is_err());
        assert!(opts.base().is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: Options = serde_json::from_str(r#"{"min_link_count": 6}"#).unwrap();

        assert_eq!(opts.min_link_count, 6);
        assert_eq!(opts.min_text_len, 5);
        assert!((opts.score_threshold - 0.5).abs() < f64::EPSILON);
    }
}
