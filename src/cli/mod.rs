//! CLI subcommand implementations for the siterank binary.

pub mod fetch_cmd;
pub mod output;
pub mod rank_cmd;

use crate::config::{FetchConfig, ScoreConfig};
use crate::fetch::client::HttpClient;
use crate::ranking::ranker::Ranking;
use crate::ranking::scorer::score_entry;
use crate::sitemap::discovery;
use crate::sitemap::resolver::SitemapResolver;
use anyhow::{Context, Result};
use chrono::Utc;
use url::Url;

/// Everything the subcommands need after resolution and scoring.
pub(crate) struct RankedSite {
    pub ranking: Ranking,
    pub sitemap_url: Url,
    pub crawl_delay: Option<f32>,
}

/// Shared pipeline: discover the sitemap, resolve the tree, score and
/// rank every entry.
pub(crate) async fn resolve_and_rank(
    client: &HttpClient,
    site: &str,
    score_config: &ScoreConfig,
    fetch_config: &FetchConfig,
) -> Result<RankedSite> {
    let site_url = normalize_site(site)?;
    let root_domain = site_url
        .host_str()
        .context("site URL has no host")?
        .to_string();

    let robots = discovery::fetch_robots(client, &site_url, &fetch_config.user_agent).await;
    let sitemap_url = discovery::discover(client, &site_url, &robots)
        .await
        .with_context(|| format!("no usable sitemap for {site_url}"))?;

    let entries = SitemapResolver::new(client)
        .resolve(&sitemap_url)
        .await
        .with_context(|| format!("failed to resolve {sitemap_url}"))?;

    let now = Utc::now();
    let scored = entries
        .iter()
        .map(|e| score_entry(e, score_config, &root_domain, now))
        .collect();

    Ok(RankedSite {
        ranking: Ranking::new(scored),
        sitemap_url,
        crawl_delay: robots.crawl_delay,
    })
}

/// Accept `example.com` as well as a full URL.
fn normalize_site(site: &str) -> Result<Url> {
    let with_scheme = if site.contains("://") {
        site.to_string()
    } else {
        format!("https://{site}")
    };
    Url::parse(&with_scheme).with_context(|| format!("invalid site URL \"{site}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_bare_domains() {
        assert_eq!(
            normalize_site("example.com").unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(
            normalize_site("http://example.com/sitemap.xml").unwrap().as_str(),
            "http://example.com/sitemap.xml"
        );
        assert!(normalize_site("not a url").is_err());
    }
}
