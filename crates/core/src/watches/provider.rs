use crate::brands;
use crate::config::Settings;
use crate::error::WatchDataError;
use crate::watches::table::Table;
use crate::watches::transport::{HttpTransport, ReqwestTransport};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;

const MARKET_INDEX_PATH: &str = "/watches/brand_chart.json";
const BRAND_PATH_PREFIX: &str = "/watches/brand_chart/";

#[async_trait::async_trait]
pub trait WatchDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Maps a brand name to this provider's code. The default warns on unknown
    /// names and continues without a code.
    fn resolve_code(&self, brand: Option<&str>) -> Result<Option<&'static str>> {
        let code = brands::resolve(brand);
        if code.is_none() {
            if let Some(brand) = brand {
                tracing::warn!(brand, "no brand code found for brand");
            }
        }
        Ok(code)
    }

    /// Fetches chart points for a brand code, or the market index when `code` is `None`.
    async fn fetch_by_code(&self, code: Option<&str>, as_of: DateTime<Utc>) -> Result<Table>;

    async fn fetch_by_name(&self, brand: Option<&str>, options: FetchOptions) -> Result<Table> {
        let code = self.resolve_code(brand)?;
        self.fetch_by_code(code, options.as_of_or_now()).await
    }
}

/// Caller-supplied parameters forwarded by [`WatchDataProvider::fetch_by_name`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Timestamp sent as the cache-busting parameter. Defaults to now.
    pub as_of: Option<DateTime<Utc>>,
}

impl FetchOptions {
    pub fn as_of(as_of: DateTime<Utc>) -> Self {
        Self { as_of: Some(as_of) }
    }

    pub fn as_of_or_now(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

/// What to do when a brand name is not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownBrandPolicy {
    /// Warn and query the market index instead.
    #[default]
    FallBackToIndex,
    /// Fail with [`WatchDataError::UnknownBrand`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub url: String,
    pub timestamp_ms: i64,
}

impl RequestTarget {
    pub fn build(base_url: &str, code: Option<&str>, as_of: DateTime<Utc>) -> Self {
        let base = base_url.trim_end_matches('/');
        let timestamp_ms = as_of.timestamp_millis();
        let url = match code {
            Some(code) => format!("{base}{BRAND_PATH_PREFIX}{code}.json?&_={timestamp_ms}"),
            None => format!("{base}{MARKET_INDEX_PATH}?&_={timestamp_ms}"),
        };
        Self { url, timestamp_ms }
    }
}

#[derive(Debug, Clone)]
pub struct WatchChartsProvider<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    unknown_brand_policy: UnknownBrandPolicy,
}

impl WatchChartsProvider<ReqwestTransport> {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = ReqwestTransport::from_settings(settings)?;
        Ok(Self::with_transport(transport, &settings.base_url)
            .with_unknown_brand_policy(settings.unknown_brand_policy))
    }
}

impl<T: HttpTransport> WatchChartsProvider<T> {
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            unknown_brand_policy: UnknownBrandPolicy::default(),
        }
    }

    pub fn with_unknown_brand_policy(mut self, policy: UnknownBrandPolicy) -> Self {
        self.unknown_brand_policy = policy;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn target(&self, code: Option<&str>, as_of: DateTime<Utc>) -> RequestTarget {
        RequestTarget::build(&self.base_url, code, as_of)
    }
}

#[async_trait::async_trait]
impl<T: HttpTransport> WatchDataProvider for WatchChartsProvider<T> {
    fn provider_name(&self) -> &'static str {
        "watchcharts"
    }

    fn resolve_code(&self, brand: Option<&str>) -> Result<Option<&'static str>> {
        let code = brands::resolve(brand);
        match (brand, code) {
            (Some(brand), None) => match self.unknown_brand_policy {
                UnknownBrandPolicy::FallBackToIndex => {
                    tracing::warn!(brand, "no brand code found for brand; using market index");
                    Ok(None)
                }
                UnknownBrandPolicy::Reject => Err(WatchDataError::UnknownBrand {
                    brand: brand.to_string(),
                }
                .into()),
            },
            _ => Ok(code),
        }
    }

    async fn fetch_by_code(&self, code: Option<&str>, as_of: DateTime<Utc>) -> Result<Table> {
        let target = self.target(code, as_of);
        if code.is_none() {
            tracing::info!(url = %target.url, "no brand specified; fetching market index data");
        }

        let res = self
            .transport
            .get(&target.url)
            .await
            .context("watch charts request failed")?;

        if res.status != StatusCode::OK {
            tracing::error!(
                brand_code = code.unwrap_or("none"),
                http_status = %res.status,
                url = %target.url,
                "failed to get watch charts index data"
            );
            return Ok(Table::empty());
        }

        Table::from_json_str(&res.body).map_err(|err| {
            WatchDataError::Decode {
                url: target.url,
                detail: format!("{err:#}"),
            }
            .into()
        })
    }
}
