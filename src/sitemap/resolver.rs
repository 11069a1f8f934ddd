//! Resolve a sitemap tree into a flat, deduplicated set of URL entries.

use super::parser;
use super::types::{SitemapDocument, SitemapEntry};
use crate::error::Result;
use crate::fetch::client::HttpClient;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

/// Walks from a root sitemap URL through any index structure, retrieving
/// and parsing each child document.
///
/// Traversal is an explicit work queue over a visited-URL set, so a
/// sitemap index that references itself (directly or through a chain)
/// terminates: a document URL seen twice is treated as an empty result.
/// A fetch or parse failure on a child document is logged and skipped —
/// partial coverage, never an aborted run. Only a fetch failure on the
/// root document is returned to the caller.
pub struct SitemapResolver<'a> {
    client: &'a HttpClient,
}

impl<'a> SitemapResolver<'a> {
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Resolve the tree rooted at `root` into entries in discovery order.
    ///
    /// When the same URL appears in multiple child documents the
    /// first-seen entry wins; conflicting metadata from later duplicates
    /// is discarded, not merged.
    pub async fn resolve(&self, root: &Url) -> Result<Vec<SitemapEntry>> {
        let mut queue: VecDeque<Url> = VecDeque::from([root.clone()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut entries: Vec<SitemapEntry> = Vec::new();
        let mut is_root = true;

        while let Some(doc_url) = queue.pop_front() {
            if !visited.insert(doc_url.as_str().to_string()) {
                debug!(document = %doc_url, "already visited, skipping");
                continue;
            }

            let body = match self.client.get_text(&doc_url).await {
                Ok(body) => body,
                Err(e) if is_root => return Err(e),
                Err(e) => {
                    warn!("skipping unreachable sitemap: {e}");
                    continue;
                }
            };
            is_root = false;

            match parser::parse_document(&body, &doc_url) {
                Ok(SitemapDocument::UrlSet(list)) => {
                    debug!(document = %doc_url, urls = list.len(), "parsed urlset");
                    for entry in list {
                        if seen_urls.insert(entry.url.as_str().to_string()) {
                            entries.push(entry);
                        } else {
                            debug!(url = %entry.url, "duplicate URL, keeping first occurrence");
                        }
                    }
                }
                Ok(SitemapDocument::Index(refs)) => {
                    debug!(document = %doc_url, children = refs.len(), "parsed sitemap index");
                    for child in refs {
                        queue.push_back(child.url);
                    }
                }
                Err(e) => warn!("skipping unparseable sitemap: {e}"),
            }
        }

        info!(entries = entries.len(), documents = visited.len(), "sitemap tree resolved");
        Ok(entries)
    }
}
