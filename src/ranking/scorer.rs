//! Importance scoring for sitemap entries.
//!
//! `score_entry` is a pure function of the entry, the configuration, the
//! root domain, and the caller-supplied clock — it never reads system
//! state, so identical inputs always produce identical scores. The six
//! contributions are independent and additive; no signal depends on
//! another and the total is uncapped.

use crate::config::ScoreConfig;
use crate::sitemap::types::SitemapEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Points per percent of declared priority (priority 1.0 → 20 points).
pub const PRIORITY_WEIGHT: f64 = 20.0;
/// Depth score starts here for the root and loses `DEPTH_STEP` per segment.
pub const DEPTH_BASE: f64 = 10.0;
pub const DEPTH_STEP: f64 = 2.0;
/// Points per configured keyword found in the URL path.
pub const KEYWORD_POINTS: f64 = 8.0;
/// Flat bonus for the root page of the site.
pub const HOMEPAGE_BONUS: f64 = 25.0;
/// Recency bonus for a page modified right now; decays linearly to zero
/// at the configured horizon.
pub const RECENCY_MAX: f64 = 10.0;

/// Per-signal contributions, kept for display and persisted metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub priority: f64,
    pub change_frequency: f64,
    pub depth: f64,
    pub keywords: f64,
    pub homepage: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.priority
            + self.change_frequency
            + self.depth
            + self.keywords
            + self.homepage
            + self.recency
    }
}

/// A sitemap entry with its computed score. Immutable once built;
/// ranking only reorders.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub entry: SitemapEntry,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Non-empty path segments in the URL.
    pub depth: u32,
    /// Whether any configured keyword matched the path.
    pub has_keyword: bool,
}

/// Score one entry against the root domain at the given instant.
pub fn score_entry(
    entry: &SitemapEntry,
    config: &ScoreConfig,
    root_domain: &str,
    now: DateTime<Utc>,
) -> ScoredEntry {
    let depth = url_depth(&entry.url);
    let path_lower = entry.url.path().to_ascii_lowercase();

    let priority = entry
        .priority
        .filter(|p| (0.0..=1.0).contains(p))
        .unwrap_or(0.5)
        * PRIORITY_WEIGHT;

    let change_frequency = config.frequency_score(entry.change_frequency);

    let depth_score = (DEPTH_BASE - DEPTH_STEP * depth as f64).max(0.0);

    let matches = config
        .keywords
        .iter()
        .filter(|k| path_lower.contains(&k.to_ascii_lowercase()))
        .count();
    let keywords = matches as f64 * KEYWORD_POINTS;

    let homepage = if is_homepage(&entry.url, root_domain) {
        HOMEPAGE_BONUS
    } else {
        0.0
    };

    let recency = entry
        .last_modified
        .map(|lm| recency_score(lm, now, config.recency_horizon_days))
        .unwrap_or(0.0);

    let breakdown = ScoreBreakdown {
        priority,
        change_frequency,
        depth: depth_score,
        keywords,
        homepage,
        recency,
    };

    ScoredEntry {
        entry: entry.clone(),
        score: breakdown.total(),
        breakdown,
        depth,
        has_keyword: matches > 0,
    }
}

/// Number of non-empty path segments.
pub fn url_depth(url: &Url) -> u32 {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).count() as u32)
        .unwrap_or(0)
}

fn is_homepage(url: &Url, root_domain: &str) -> bool {
    let path_is_root = matches!(url.path(), "" | "/");
    path_is_root
        && url
            .host_str()
            .map(|h| strip_www(h).eq_ignore_ascii_case(strip_www(root_domain)))
            .unwrap_or(false)
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn recency_score(last_modified: DateTime<Utc>, now: DateTime<Utc>, horizon_days: u32) -> f64 {
    let horizon = horizon_days as f64;
    if horizon <= 0.0 {
        return 0.0;
    }
    // Future lastmod clamps to age zero and earns the full bonus.
    let age_days = ((now - last_modified).num_seconds() as f64 / 86_400.0).max(0.0);
    if age_days >= horizon {
        0.0
    } else {
        RECENCY_MAX * (1.0 - age_days / horizon)
    }
}
