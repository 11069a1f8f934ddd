//! Locate the root sitemap for a site.
//!
//! Given a bare site URL, probes the well-known sitemap locations with
//! HEAD requests, then falls back to `Sitemap:` directives in robots.txt.
//! A URL that already points at an XML document is used as-is.

use super::robots::{parse_robots, RobotsInfo};
use crate::error::{Error, Result};
use crate::fetch::client::HttpClient;
use tracing::{debug, info};
use url::Url;

/// Well-known sitemap locations, probed in order.
const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemaps.xml",
    "/sitemap1.xml",
    "/wp-sitemap.xml",
    "/sitemap/sitemap.xml",
];

/// The site URL with path, query, and fragment reset — scheme, host, and
/// any explicit port are preserved.
pub fn site_origin(site: &Url) -> Result<Url> {
    if !site.has_host() {
        return Err(Error::Validation(format!("site URL \"{site}\" has no host")));
    }
    let mut origin = site.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    Ok(origin)
}

/// Fetch and parse the site's robots.txt. Unreachable or missing
/// robots.txt yields empty directives, never an error.
pub async fn fetch_robots(client: &HttpClient, site: &Url, user_agent: &str) -> RobotsInfo {
    let Ok(origin) = site_origin(site) else {
        return RobotsInfo::default();
    };
    let Ok(robots_url) = origin.join("robots.txt") else {
        return RobotsInfo::default();
    };
    match client.get_text(&robots_url).await {
        Ok(txt) => {
            let info = parse_robots(&txt, user_agent);
            debug!(
                sitemaps = info.sitemaps.len(),
                crawl_delay = ?info.crawl_delay,
                "read robots.txt"
            );
            info
        }
        Err(e) => {
            debug!("no robots.txt: {e}");
            RobotsInfo::default()
        }
    }
}

/// Find the root sitemap URL for `site`.
///
/// If `site` already names an XML document it is returned unchanged.
/// Otherwise the well-known paths are probed, then robots `Sitemap:`
/// directives; as a last resort `/sitemap.xml` is returned untested and
/// resolution will surface the failure.
pub async fn discover(client: &HttpClient, site: &Url, robots: &RobotsInfo) -> Result<Url> {
    if site.path().ends_with(".xml") || site.path().ends_with(".xml.gz") {
        return Ok(site.clone());
    }

    let origin = site_origin(site)?;

    for p in SITEMAP_PATHS {
        let Ok(candidate) = origin.join(p) else {
            continue;
        };
        match client.head_status(&candidate).await {
            Ok(status) if (200..300).contains(&status) => {
                info!(sitemap = %candidate, "found sitemap");
                return Ok(candidate);
            }
            Ok(_) | Err(_) => continue,
        }
    }

    for s in &robots.sitemaps {
        if let Ok(candidate) = Url::parse(s) {
            info!(sitemap = %candidate, "using sitemap from robots.txt");
            return Ok(candidate);
        }
    }

    let fallback = origin.join("/sitemap.xml").map_err(|e| {
        Error::Validation(format!("cannot build sitemap URL for \"{origin}\": {e}"))
    })?;
    info!(sitemap = %fallback, "no sitemap advertised, trying default location");
    Ok(fallback)
}
