//! Importance scoring and ranking of resolved sitemap entries.

pub mod ranker;
pub mod scorer;
