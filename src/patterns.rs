//! Compiled regex patterns for link text and date extraction.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Every date pattern exposes a `raw` group spanning the matched date (and
//! optional time) plus named numeric groups: `y`, `m`, `d` for the date,
//! `a`/`b` for the two leading fields of day/month-first forms, and `hh`,
//! `mi`, `ss` for the time.
//!
//! The numeric patterns guard only their leading edge; the regex crate has
//! no lookahead, so callers reject a `raw` match followed by a digit.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

// =============================================================================
// Date Patterns
// =============================================================================

/// `2024年1月5日`, `2024 年 01 月 05 日 08:30`.
pub static DATE_CJK_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<raw>(?P<y>\d{4})\s*年\s*(?P<m>\d{1,2})\s*月\s*(?P<d>\d{1,2})\s*[日号號]?(?:\s*(?P<hh>\d{1,2})\s*[:：时時点點]\s*(?P<mi>\d{1,2})(?:\s*[:：分]\s*(?P<ss>\d{1,2}))?)?)",
    )
    .expect("DATE_CJK_FULL regex")
});

/// `2024-01-05`, `2024/1/5`, `2024.01.05`, optionally followed by `08:30[:15]`.
pub static DATE_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\D)(?P<raw>(?P<y>\d{4})[-/.](?P<m>\d{1,2})[-/.](?P<d>\d{1,2})(?:[\sT]+(?P<hh>\d{1,2}):(?P<mi>\d{2})(?::(?P<ss>\d{2}))?)?)",
    )
    .expect("DATE_YMD regex")
});

/// `01-05-2024`, `5/1/2024`, `05.01.2024`, optionally followed by a time.
///
/// Whether `a` is the month or the day is decided when the value is parsed.
pub static DATE_DMY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\D)(?P<raw>(?P<a>\d{1,2})[-/.](?P<b>\d{1,2})[-/.](?P<y>\d{4})(?:[\sT]+(?P<hh>\d{1,2}):(?P<mi>\d{2})(?::(?P<ss>\d{2}))?)?)",
    )
    .expect("DATE_DMY regex")
});

/// `1月5日`, `01月05日 08:30` (year omitted).
pub static DATE_CJK_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|\D)(?P<raw>(?P<m>\d{1,2})\s*月\s*(?P<d>\d{1,2})\s*[日号號]?(?:\s*(?P<hh>\d{1,2})\s*[:：时時点點]\s*(?P<mi>\d{1,2}))?)",
    )
    .expect("DATE_CJK_MONTH_DAY regex")
});
