//! Minimal robots.txt reader.
//!
//! Only the pieces the pipeline needs: global `Sitemap:` directives for
//! discovery and the crawl-delay of the matching user-agent group as a
//! fetch-pacing hint. Allow/disallow policy is out of scope.

/// Directives extracted from a robots.txt document.
#[derive(Debug, Clone, Default)]
pub struct RobotsInfo {
    /// `Sitemap:` directives, in file order.
    pub sitemaps: Vec<String>,
    /// Crawl-delay in seconds for the matching user-agent group.
    pub crawl_delay: Option<f32>,
}

/// Parse a robots.txt string for a specific user agent.
pub fn parse_robots(txt: &str, user_agent: &str) -> RobotsInfo {
    let mut info = RobotsInfo::default();
    let mut in_matching_group = false;
    let mut found_matching_group = false;
    let ua_lower = user_agent.to_lowercase();

    for line in txt.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.split('#').next().unwrap_or("").trim();

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    let ua = value.to_lowercase();
                    in_matching_group = ua == "*" || ua_lower.contains(&ua);
                    if in_matching_group {
                        found_matching_group = true;
                    }
                }
                "crawl-delay" if in_matching_group || !found_matching_group => {
                    if let Ok(delay) = value.parse::<f32>() {
                        info.crawl_delay = Some(delay);
                    }
                }
                // Sitemap directives are global, not group-scoped.
                "sitemap" => {
                    if !value.is_empty() {
                        info.sitemaps.push(value.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_sitemaps_and_crawl_delay() {
        let txt = r#"
User-agent: *
Disallow: /admin
Crawl-delay: 1.5

Sitemap: https://example.com/sitemap.xml
Sitemap: https://example.com/sitemap-blog.xml
"#;
        let info = parse_robots(txt, "siterank");
        assert_eq!(info.sitemaps.len(), 2);
        assert_eq!(info.sitemaps[0], "https://example.com/sitemap.xml");
        assert_eq!(info.crawl_delay, Some(1.5));
    }

    #[test]
    fn crawl_delay_prefers_matching_group() {
        let txt = r#"
User-agent: *
Crawl-delay: 10

User-agent: siterank
Crawl-delay: 2
"#;
        let info = parse_robots(txt, "siterank/0.1");
        assert_eq!(info.crawl_delay, Some(2.0));
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let txt = "# nothing here\n\nSitemap: https://example.com/s.xml # trailing";
        let info = parse_robots(txt, "siterank");
        // The inline-comment strip must not eat the URL itself.
        assert_eq!(info.sitemaps, vec!["https://example.com/s.xml".to_string()]);
        assert_eq!(info.crawl_delay, None);
    }
}
