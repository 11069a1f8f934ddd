//! siterank — resolve a site's sitemap tree, score every URL by estimated
//! importance, and fetch the pages that matter.
//!
//! The core pipeline is a library: [`sitemap::resolver`] flattens an
//! arbitrarily nested sitemap index into a deduplicated entry set,
//! [`ranking::scorer`] assigns each entry a deterministic score from six
//! additive signals, and [`ranking::ranker`] orders the result. The fetch
//! loop, terminal UI, and on-disk persistence live at the edges
//! ([`fetch`], [`cli`], [`storage`]) and consume the ranked output.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ranking;
pub mod sitemap;
pub mod storage;

pub use config::{FetchConfig, ScoreConfig};
pub use error::{Error, Result};
pub use ranking::ranker::Ranking;
pub use ranking::scorer::{score_entry, ScoreBreakdown, ScoredEntry};
pub use sitemap::resolver::SitemapResolver;
pub use sitemap::types::{ChangeFrequency, SitemapEntry, SitemapIndexRef};
