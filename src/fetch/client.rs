//! Shared HTTP client for sitemap documents and page bodies.
//!
//! Wraps a single `reqwest::Client` with the configured User-Agent,
//! timeout, and limited redirects. Gzip response bodies are decompressed
//! transparently, so the XML parser only ever sees text.

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use tracing::debug;
use url::Url;

pub struct HttpClient {
    inner: reqwest::Client,
    retries: u32,
}

impl HttpClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            inner,
            retries: config.retries,
        })
    }

    /// GET a document and return its body as text.
    ///
    /// A non-2xx status, timeout, or transport failure (after retries)
    /// yields [`Error::Fetch`].
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        let resp = self.send(url).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::fetch(url.as_str(), format!("status {status}")));
        }
        resp.text()
            .await
            .map_err(|e| Error::fetch(url.as_str(), e))
    }

    /// HEAD probe returning the response status code.
    pub async fn head_status(&self, url: &Url) -> Result<u16> {
        let resp = self
            .inner
            .head(url.clone())
            .send()
            .await
            .map_err(|e| Error::fetch(url.as_str(), e))?;
        Ok(resp.status().as_u16())
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            match self.inner.get(url.clone()).send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    debug!(url = %url, attempt, "retrying after transport error: {e}");
                }
                Err(e) => return Err(Error::fetch(url.as_str(), e)),
            }
        }
    }
}
