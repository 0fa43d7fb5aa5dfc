use crate::config::Settings;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// A single unauthenticated GET. Timeouts and connection handling live here,
/// not in the providers.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build watch data http client")?;
        Ok(Self { http })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(Duration::from_secs(settings.timeout_secs))
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("watch data request failed: {url}"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("failed to read watch data response")?;
        Ok(HttpResponse { status, body })
    }
}
