//! HTTP retrieval: shared client, fetch pacing, and the page fetch loop.

pub mod client;
pub mod orchestrator;
pub mod rate_limiter;
