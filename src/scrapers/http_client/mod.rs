//! HTTP client backing the [`Fetcher`] capability.

mod user_agent;

pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Fetcher;
use crate::config::Settings;
use crate::error::{CrawlError, Result};

/// Single-attempt HTTP client. No retries, no concurrency.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    request_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with custom user agent configuration.
    pub fn with_user_agent(
        timeout: Duration,
        request_delay: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| CrawlError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            request_delay,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_user_agent(
            settings.request_timeout(),
            settings.request_delay(),
            settings.user_agent.as_deref(),
        )
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CrawlError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::transport(url, format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CrawlError::transport(url, e))?;

        debug!(
            "GET {} {:?} -> {} ({} bytes, {}ms)",
            url,
            query,
            status.as_u16(),
            body.len(),
            start.elapsed().as_millis()
        );

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        Ok(body)
    }
}
