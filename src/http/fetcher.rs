use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::HttpError;
use crate::load::{Fetch, FetchTarget, Outcome};

use super::client::build_client;

/// Connect and read phases may each use the full timeout; past this many
/// timeouts the request is dropped regardless of progress.
const HARD_DEADLINE_FACTOR: u32 = 2;

/// Fetches over a fresh interface-bound client per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl HttpFetcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that a client can be built for `target` before any load is sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be configured, e.g. when the
    /// interface has no address to bind on platforms without device binding.
    pub fn preflight(target: &FetchTarget) -> Result<(), HttpError> {
        build_client(target).map(drop)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, target: &FetchTarget) -> Outcome {
        let client = match build_client(target) {
            Ok(client) => client,
            Err(err) => {
                debug!("Client setup failed: {}", err);
                return Outcome::GenericError;
            }
        };

        let deadline = hard_deadline(target.timeout);
        match tokio::time::timeout(deadline, get_page(&client, &target.url)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => {
                debug!("Request exceeded hard deadline of {:?}", deadline);
                Outcome::Timeout
            }
        }
    }
}

pub(super) fn hard_deadline(timeout: Duration) -> Duration {
    timeout.saturating_mul(HARD_DEADLINE_FACTOR)
}

async fn get_page(client: &Client, url: &Url) -> Outcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("Request failed: {}", err);
            return classify_error(&err);
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        debug!("Return code is {}", status.as_u16());
        return classify_status(status);
    }

    match drain_response_body(response).await {
        Ok(_bytes) => Outcome::Success,
        Err(err) => {
            debug!("Failed to read response body: {}", err);
            if err.is_timeout() {
                Outcome::Timeout
            } else {
                Outcome::GenericError
            }
        }
    }
}

/// Connection failures win over timeouts: a connect that times out never
/// established a connection.
pub(super) fn classify_error(err: &reqwest::Error) -> Outcome {
    if err.is_connect() {
        Outcome::ConnectionError
    } else if err.is_timeout() {
        Outcome::Timeout
    } else {
        Outcome::GenericError
    }
}

pub(super) fn classify_status(status: StatusCode) -> Outcome {
    if status == StatusCode::OK {
        Outcome::Success
    } else {
        Outcome::GenericError
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
