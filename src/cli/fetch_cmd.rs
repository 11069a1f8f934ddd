//! `siterank fetch <site>` — rank, confirm, and fetch the top pages.

use crate::cli::output::{self, Styled};
use crate::cli::resolve_and_rank;
use crate::config::{FetchConfig, ScoreConfig};
use crate::fetch::client::HttpClient;
use crate::fetch::orchestrator::FetchOrchestrator;
use crate::fetch::rate_limiter::RateLimiter;
use crate::storage::DirStore;
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// Run the fetch command.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    site: &str,
    top: usize,
    out_dir: &Path,
    yes: bool,
    delay_ms: u64,
    timeout_secs: u64,
    keywords: &[String],
) -> Result<()> {
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
        fetch_delay: Duration::from_millis(delay_ms),
        ..FetchConfig::default()
    };

    let client = HttpClient::new(&fetch_config)?;
    let ranked = resolve_and_rank(&client, site, &score_config, &fetch_config).await?;

    if ranked.ranking.is_empty() {
        bail!("no URLs found in {}", ranked.sitemap_url);
    }

    let selection = ranked.ranking.top(top);
    eprintln!(
        "  Resolved {} URLs from {}; selected the top {}.",
        ranked.ranking.len(),
        s.cyan(ranked.sitemap_url.as_str()),
        selection.len()
    );
    eprintln!();
    output::print_ranking(&s, selection);
    eprintln!();

    if !yes && !confirm(&format!("Fetch these {} pages?", selection.len()))? {
        eprintln!("  {}", s.yellow("Cancelled."));
        return Ok(());
    }

    let store = DirStore::create(out_dir)?;
    let limiter = RateLimiter::from_crawl_delay(ranked.crawl_delay, fetch_config.fetch_delay);
    let orchestrator = FetchOrchestrator::new(&client, limiter);

    let bar = progress_bar(selection.len() as u64);
    let report = orchestrator
        .fetch_all(selection, &store, |_, e| {
            bar.set_message(e.entry.url.to_string());
            bar.inc(1);
        })
        .await;
    bar.finish_and_clear();

    let status = if report.failed == 0 {
        s.green("done")
    } else {
        s.yellow("done with errors")
    };
    eprintln!(
        "  {status}: {} fetched, {} failed in {} -> {}",
        report.fetched,
        report.failed,
        output::format_duration(start.elapsed().as_secs()),
        store.dir().display()
    );

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "fetched": report.fetched,
            "failed": report.failed,
            "output_dir": store.dir().display().to_string(),
            "duration_ms": start.elapsed().as_millis() as u64,
        }));
    }

    Ok(())
}

/// Ask for a y/n answer on the terminal.
fn confirm(prompt: &str) -> Result<bool> {
    loop {
        eprint!("  {prompt} [y/n] ");
        std::io::stderr().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("  Please answer 'y' or 'n'."),
        }
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if output::is_quiet() {
        bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    bar.set_style(
        ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}
