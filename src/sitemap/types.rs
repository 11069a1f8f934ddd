//! Data model for resolved sitemap documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use url::Url;

/// One URL discovered in a urlset document, with its sitemap-declared
/// metadata.
///
/// `url` is always absolute (scheme and host present); relative or
/// malformed locations are dropped during parsing. Within a resolved set
/// the URL is unique — the first occurrence across sub-sitemaps wins.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub url: Url,
    /// Declared priority in [0.0, 1.0]. `None` when absent or out of
    /// range; the scorer substitutes 0.5.
    pub priority: Option<f64>,
    /// `None` when absent or the token is unrecognized.
    pub change_frequency: Option<ChangeFrequency>,
    /// `None` when absent or malformed.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Pointer to a child sitemap document inside a sitemapindex.
///
/// Exists only during resolution; never part of the ranked output.
#[derive(Debug, Clone)]
pub struct SitemapIndexRef {
    pub url: Url,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A parsed sitemap document, classified by its root element.
#[derive(Debug)]
pub enum SitemapDocument {
    /// A leaf `<urlset>` document.
    UrlSet(Vec<SitemapEntry>),
    /// A `<sitemapindex>` document pointing at child sitemaps.
    Index(Vec<SitemapIndexRef>),
}

/// The `<changefreq>` vocabulary from the sitemaps.org protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Parse a `<changefreq>` token. Unrecognized tokens yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Some(Self::Always),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// Parse a `<lastmod>` value: RFC 3339, or a bare `YYYY-MM-DD` date.
///
/// Malformed values yield `None`, never an error.
pub fn parse_lastmod(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_frequency_tokens() {
        assert_eq!(ChangeFrequency::parse("weekly"), Some(ChangeFrequency::Weekly));
        assert_eq!(ChangeFrequency::parse(" DAILY "), Some(ChangeFrequency::Daily));
        assert_eq!(ChangeFrequency::parse("fortnightly"), None);
        assert_eq!(ChangeFrequency::parse(""), None);
    }

    #[test]
    fn lastmod_rfc3339() {
        let dt = parse_lastmod("2026-01-15T12:30:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T12:30:00+00:00");

        let offset = parse_lastmod("2026-01-15T12:30:00+02:00").unwrap();
        assert_eq!(offset.to_rfc3339(), "2026-01-15T10:30:00+00:00");
    }

    #[test]
    fn lastmod_bare_date() {
        let dt = parse_lastmod("2026-01-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T00:00:00+00:00");
    }

    #[test]
    fn lastmod_malformed_is_absent() {
        assert!(parse_lastmod("yesterday").is_none());
        assert!(parse_lastmod("2026-99-99").is_none());
        assert!(parse_lastmod("").is_none());
    }
}
