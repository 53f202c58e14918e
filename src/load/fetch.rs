use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// Terminal classification of one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    ConnectionError,
    Timeout,
    GenericError,
}

/// Everything a single fetch needs, passed explicitly to every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub url: Url,
    /// `None` sends over the default route.
    pub interface: Option<String>,
    pub timeout: Duration,
}

/// Performs one request and reduces its result to an [`Outcome`].
///
/// Implementations must not panic on network failures and must return within
/// a bounded time derived from `target.timeout`; the batch runner still
/// contains panics and counts them as [`Outcome::GenericError`].
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, target: &FetchTarget) -> Outcome;
}
