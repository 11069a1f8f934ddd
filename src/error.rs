//! Error taxonomy for sitemap resolution and scoring.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving and scoring a sitemap tree.
///
/// None of these abort a resolution run on their own: document-level
/// failures are logged and skipped, entry-level failures drop the single
/// entry. The only fatal case is a `Fetch` error for the root document,
/// which the resolver returns to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Retrieving a document failed: network error, timeout, or non-2xx.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A document was not parseable sitemap XML.
    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// A single entry carried invalid data (missing or repeated `<loc>`,
    /// non-numeric priority, relative URL).
    #[error("invalid sitemap entry: {0}")]
    Validation(String),

    /// The HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    Client(String),
}

impl Error {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
