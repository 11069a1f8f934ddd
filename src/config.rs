//! Immutable configuration for scoring and fetching.

use crate::sitemap::types::ChangeFrequency;
use std::time::Duration;

/// Weights and thresholds consumed by the scorer and ranker.
///
/// Built once and passed by reference; nothing in here is mutated after
/// construction, so scoring stays deterministic and safe to test in
/// parallel.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Keywords matched case-insensitively against the URL path.
    /// Each match adds [`KEYWORD_POINTS`](crate::ranking::scorer::KEYWORD_POINTS).
    pub keywords: Vec<String>,
    /// Points awarded per change frequency, spanning 0 to 15.
    pub frequency_points: Vec<(ChangeFrequency, f64)>,
    /// Frequency assumed when a sitemap omits `<changefreq>`.
    pub default_frequency: ChangeFrequency,
    /// How many entries the bounded top view exposes by default.
    pub top_n: usize,
    /// Age at which the recency bonus decays to zero.
    pub recency_horizon_days: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "about", "contact", "services", "products", "pricing", "team", "blog", "faq",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            frequency_points: vec![
                (ChangeFrequency::Always, 15.0),
                (ChangeFrequency::Hourly, 12.75),
                (ChangeFrequency::Daily, 10.5),
                (ChangeFrequency::Weekly, 8.25),
                (ChangeFrequency::Monthly, 6.0),
                (ChangeFrequency::Yearly, 3.0),
                (ChangeFrequency::Never, 0.0),
            ],
            default_frequency: ChangeFrequency::Monthly,
            top_n: 25,
            recency_horizon_days: 365,
        }
    }
}

impl ScoreConfig {
    /// Points for a (possibly absent) change frequency.
    ///
    /// Absent or unrecognized frequencies fall back to the default
    /// frequency's points.
    pub fn frequency_score(&self, freq: Option<ChangeFrequency>) -> f64 {
        let freq = freq.unwrap_or(self.default_frequency);
        self.frequency_points
            .iter()
            .find(|(f, _)| *f == freq)
            .map(|(_, pts)| *pts)
            .unwrap_or(0.0)
    }
}

/// Settings for the HTTP layer and fetch pacing.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-document retrieval timeout.
    pub timeout: Duration,
    /// Minimum delay between successive page fetches.
    pub fetch_delay: Duration,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Extra attempts after a transport error.
    pub retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            fetch_delay: Duration::from_millis(2000),
            user_agent: format!("siterank/{} (+https://github.com/siterank/siterank)", env!("CARGO_PKG_VERSION")),
            retries: 1,
        }
    }
}
