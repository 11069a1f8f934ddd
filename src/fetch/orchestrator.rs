//! Rate-limited retrieval of the confirmed top-ranked pages.
//!
//! The orchestrator owns only the fetch loop. Persistence goes through
//! the [`PageSink`] trait so storage format and location stay with the
//! collaborator, and a per-page failure never aborts the run.

use super::client::HttpClient;
use super::rate_limiter::RateLimiter;
use crate::ranking::scorer::ScoredEntry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// One successfully retrieved page, ready for persistence.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 1-based position in the confirmed ranking.
    pub rank: usize,
    pub entry: ScoredEntry,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

/// Receives fetched pages. Implemented by the storage collaborator.
#[async_trait]
pub trait PageSink: Send + Sync {
    async fn store(&self, page: &FetchedPage) -> anyhow::Result<()>;
}

/// Outcome counts for one fetch run.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchReport {
    pub fetched: usize,
    pub failed: usize,
}

pub struct FetchOrchestrator<'a> {
    client: &'a HttpClient,
    limiter: RateLimiter,
}

impl<'a> FetchOrchestrator<'a> {
    pub fn new(client: &'a HttpClient, limiter: RateLimiter) -> Self {
        Self { client, limiter }
    }

    /// Fetch every entry in ranked order, pacing between requests.
    ///
    /// `on_page` fires before each retrieval with the 1-based rank; the
    /// CLI uses it to drive progress display. Fetch and store failures
    /// are logged, counted, and skipped.
    pub async fn fetch_all(
        &self,
        pages: &[ScoredEntry],
        sink: &dyn PageSink,
        mut on_page: impl FnMut(usize, &ScoredEntry) + Send,
    ) -> FetchReport {
        let mut report = FetchReport::default();

        for (i, scored) in pages.iter().enumerate() {
            let rank = i + 1;
            self.limiter.wait().await;
            on_page(rank, scored);

            let html = match self.client.get_text(&scored.entry.url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("skipping page: {e}");
                    report.failed += 1;
                    continue;
                }
            };

            let page = FetchedPage {
                rank,
                entry: scored.clone(),
                html,
                fetched_at: Utc::now(),
            };
            match sink.store(&page).await {
                Ok(()) => {
                    info!(url = %page.entry.entry.url, rank, "stored page");
                    report.fetched += 1;
                }
                Err(e) => {
                    warn!(url = %page.entry.entry.url, "failed to store page: {e}");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::ranking::scorer::ScoreBreakdown;
    use crate::sitemap::types::SitemapEntry;
    use std::sync::Mutex;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct MemorySink {
        stored: Mutex<Vec<(usize, String)>>,
    }

    #[async_trait]
    impl PageSink for MemorySink {
        async fn store(&self, page: &FetchedPage) -> anyhow::Result<()> {
            self.stored
                .lock()
                .unwrap()
                .push((page.rank, page.entry.entry.url.path().to_string()));
            Ok(())
        }
    }

    fn scored(url: &str) -> ScoredEntry {
        ScoredEntry {
            entry: SitemapEntry {
                url: Url::parse(url).unwrap(),
                priority: None,
                change_frequency: None,
                last_modified: None,
            },
            score: 1.0,
            breakdown: ScoreBreakdown {
                priority: 1.0,
                change_frequency: 0.0,
                depth: 0.0,
                keywords: 0.0,
                homepage: 0.0,
                recency: 0.0,
            },
            depth: 0,
            has_keyword: false,
        }
    }

    #[tokio::test]
    async fn fetches_in_rank_order_and_skips_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/one"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>1</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/two"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>2</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&FetchConfig::default()).unwrap();
        let orchestrator =
            FetchOrchestrator::new(&client, RateLimiter::new(Duration::from_millis(0)));
        let sink = MemorySink::default();

        let pages = vec![
            scored(&format!("{}/one", server.uri())),
            scored(&format!("{}/broken", server.uri())),
            scored(&format!("{}/two", server.uri())),
        ];
        let mut seen = Vec::new();
        let report = orchestrator
            .fetch_all(&pages, &sink, |rank, _| seen.push(rank))
            .await;

        assert_eq!(report.fetched, 2);
        assert_eq!(report.failed, 1);
        // Progress fired for every page, including the failed one.
        assert_eq!(seen, vec![1, 2, 3]);

        let stored = sink.stored.lock().unwrap();
        assert_eq!(*stored, vec![(1, "/one".to_string()), (3, "/two".to_string())]);
    }

    #[tokio::test]
    async fn sink_failure_is_counted_not_fatal() {
        struct FailingSink;

        #[async_trait]
        impl PageSink for FailingSink {
            async fn store(&self, _page: &FetchedPage) -> anyhow::Result<()> {
                anyhow::bail!("disk full")
            }
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&FetchConfig::default()).unwrap();
        let orchestrator =
            FetchOrchestrator::new(&client, RateLimiter::new(Duration::from_millis(0)));

        let pages = vec![scored(&format!("{}/a", server.uri()))];
        let report = orchestrator.fetch_all(&pages, &FailingSink, |_, _| {}).await;
        assert_eq!(report.fetched, 0);
        assert_eq!(report.failed, 1);
    }
}
