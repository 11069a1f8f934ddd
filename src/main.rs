use clap::{Parser, Subcommand};
use siterank::cli::{fetch_cmd, rank_cmd};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "siterank", version, about = "Rank a site's sitemap URLs by importance and fetch the top pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress progress output
    #[arg(long, global = true)]
    quiet: bool,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the sitemap tree and print the ranked URLs
    Rank {
        /// Site or sitemap URL (bare domains get https:// and discovery)
        site: String,

        /// How many entries to show
        #[arg(long, default_value_t = 25)]
        top: usize,

        /// Override the scoring keyword list (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Per-document retrieval timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Rank, confirm, and fetch the top pages to a directory
    Fetch {
        /// Site or sitemap URL (bare domains get https:// and discovery)
        site: String,

        /// How many pages to fetch
        #[arg(long, default_value_t = 25)]
        top: usize,

        /// Output directory for HTML and metadata files
        #[arg(long, default_value = "./pages")]
        out: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Minimum delay between page fetches, in milliseconds
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,

        /// Per-document retrieval timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Override the scoring keyword list (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.quiet {
        std::env::set_var("SITERANK_QUIET", "1");
    }
    if cli.json {
        std::env::set_var("SITERANK_JSON", "1");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("siterank=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Rank {
            site,
            top,
            keywords,
            timeout,
        } => rank_cmd::run(&site, top, &keywords, timeout).await,
        Command::Fetch {
            site,
            top,
            out,
            yes,
            delay_ms,
            timeout,
            keywords,
        } => fetch_cmd::run(&site, top, &out, yes, delay_ms, timeout, &keywords).await,
    }
}
