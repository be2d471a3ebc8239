pub mod threads;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use thiserror::Error;

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP client error: {0}")]
    Body(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    fn new(timeout: Duration) -> Result<Self, ApiError> {
        const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
    /// Requests go out one at a time and are never retried
    fn client(&self) -> ClientWithMiddleware {
        ClientBuilder::new(self.client.clone()).build()
    }
}
