//! `siterank rank <site>` — resolve a sitemap tree and rank its URLs.

use crate::cli::output::{self, Styled};
use crate::cli::resolve_and_rank;
use crate::config::{FetchConfig, ScoreConfig};
use crate::fetch::client::HttpClient;
use anyhow::Result;
use std::time::{Duration, Instant};

/// Run the rank command.
pub async fn run(site: &str, top: usize, keywords: &[String], timeout_secs: u64) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();

    let mut score_config = ScoreConfig {
        top_n: top,
        ..ScoreConfig::default()
    };
    if !keywords.is_empty() {
        score_config.keywords = keywords.to_vec();
    }
    let fetch_config = FetchConfig {
        timeout: Duration::from_secs(timeout_secs),
        ..FetchConfig::default()
    };

    let client = HttpClient::new(&fetch_config)?;
    let ranked = resolve_and_rank(&client, site, &score_config, &fetch_config).await?;

    if output::is_json() {
        print_ranking_json(ranked.ranking.top(top), ranked.ranking.len());
        return Ok(());
    }

    if ranked.ranking.is_empty() {
        eprintln!("  {} no URLs found in {}", s.yellow("!"), ranked.sitemap_url);
        return Ok(());
    }

    if !output::is_quiet() {
        eprintln!(
            "  Resolved {} URLs from {} in {:.1}s",
            ranked.ranking.len(),
            s.cyan(ranked.sitemap_url.as_str()),
            start.elapsed().as_secs_f64()
        );
        eprintln!();
    }

    output::print_ranking(&s, ranked.ranking.top(top));

    if !output::is_quiet() && ranked.ranking.len() > top {
        eprintln!();
        eprintln!(
            "  {}",
            s.dim(&format!(
                "Showing top {top} of {} ranked URLs.",
                ranked.ranking.len()
            ))
        );
    }

    Ok(())
}

fn print_ranking_json(top: &[crate::ranking::scorer::ScoredEntry], total: usize) {
    let entries: Vec<serde_json::Value> = top
        .iter()
        .enumerate()
        .map(|(i, e)| {
            serde_json::json!({
                "rank": i + 1,
                "score": e.score,
                "depth": e.depth,
                "has_keyword": e.has_keyword,
                "url": e.entry.url.as_str(),
                "breakdown": e.breakdown,
            })
        })
        .collect();

    output::print_json(&serde_json::json!({
        "total": total,
        "entries": entries,
    }));
}
