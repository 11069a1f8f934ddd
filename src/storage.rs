//! Disk persistence for fetched pages.
//!
//! One HTML file plus one JSON metadata sidecar per page, named by rank
//! and a slug of the URL path. The metadata carries everything needed to
//! audit the ranking afterwards: the score, its per-signal breakdown, and
//! the sitemap-declared fields.

use crate::fetch::orchestrator::{FetchedPage, PageSink};
use crate::ranking::scorer::ScoreBreakdown;
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores pages under a single output directory.
pub struct DirStore {
    dir: PathBuf,
}

#[derive(Serialize)]
struct PageMetadata<'a> {
    url: &'a str,
    rank: usize,
    score: f64,
    depth: u32,
    has_keyword: bool,
    priority: Option<f64>,
    change_frequency: Option<&'static str>,
    last_modified: Option<String>,
    title: Option<String>,
    fetched_at: String,
    breakdown: &'a ScoreBreakdown,
}

impl DirStore {
    /// Create the output directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn base_name(page: &FetchedPage) -> String {
        format!("{:03}_{}", page.rank, slug(page.entry.entry.url.path()))
    }
}

#[async_trait]
impl PageSink for DirStore {
    async fn store(&self, page: &FetchedPage) -> Result<()> {
        let base = Self::base_name(page);
        let html_path = self.dir.join(format!("{base}.html"));
        let meta_path = self.dir.join(format!("{base}.meta.json"));

        std::fs::write(&html_path, &page.html)
            .with_context(|| format!("failed to write {}", html_path.display()))?;

        let entry = &page.entry.entry;
        let meta = PageMetadata {
            url: entry.url.as_str(),
            rank: page.rank,
            score: page.entry.score,
            depth: page.entry.depth,
            has_keyword: page.entry.has_keyword,
            priority: entry.priority,
            change_frequency: entry.change_frequency.map(|f| f.as_str()),
            last_modified: entry.last_modified.map(|d| d.to_rfc3339()),
            title: extract_title(&page.html),
            fetched_at: page.fetched_at.to_rfc3339(),
            breakdown: &page.entry.breakdown,
        };
        let json = serde_json::to_string_pretty(&meta)?;
        std::fs::write(&meta_path, json)
            .with_context(|| format!("failed to write {}", meta_path.display()))?;

        debug!(html = %html_path.display(), "wrote page");
        Ok(())
    }
}

/// Filesystem-safe slug of a URL path.
fn slug(path: &str) -> String {
    let mut out = String::new();
    let mut last_dash = false;
    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(60);
    if out.is_empty() {
        "index".to_string()
    } else {
        out
    }
}

/// First `<title>` text of the document, if any.
fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("title").ok()?;
    doc.select(&sel)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
