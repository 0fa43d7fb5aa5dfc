use crate::watches::provider::{FetchOptions, WatchDataProvider};
use crate::watches::table::Table;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Wraps a provider and logs the start and end of every fetch.
#[derive(Debug, Clone)]
pub struct Logged<P> {
    inner: P,
}

impl<P: WatchDataProvider> Logged<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait::async_trait]
impl<P: WatchDataProvider> WatchDataProvider for Logged<P> {
    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn resolve_code(&self, brand: Option<&str>) -> Result<Option<&'static str>> {
        self.inner.resolve_code(brand)
    }

    async fn fetch_by_code(&self, code: Option<&str>, as_of: DateTime<Utc>) -> Result<Table> {
        let provider = self.inner.provider_name();
        tracing::debug!(provider, code, %as_of, "fetch_by_code start");
        let started = Instant::now();
        let res = self.inner.fetch_by_code(code, as_of).await;
        log_end(provider, "fetch_by_code", started, &res);
        res
    }

    async fn fetch_by_name(&self, brand: Option<&str>, options: FetchOptions) -> Result<Table> {
        let provider = self.inner.provider_name();
        tracing::debug!(provider, brand, as_of = ?options.as_of, "fetch_by_name start");
        let started = Instant::now();
        let res = self.inner.fetch_by_name(brand, options).await;
        log_end(provider, "fetch_by_name", started, &res);
        res
    }
}

fn log_end(provider: &str, op: &str, started: Instant, res: &Result<Table>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match res {
        Ok(table) => tracing::debug!(provider, op, rows = table.len(), elapsed_ms, "fetch end"),
        Err(err) => tracing::debug!(provider, op, elapsed_ms, error = %err, "fetch end with error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watches::test_support::capture_levels;
    use chrono::TimeZone;
    use std::sync::Mutex;
    use tracing::Level;

    /// Provider relying on the trait defaults for name resolution.
    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<(Option<String>, i64)>>,
    }

    #[async_trait::async_trait]
    impl WatchDataProvider for RecordingProvider {
        fn provider_name(&self) -> &'static str {
            "recording"
        }

        async fn fetch_by_code(&self, code: Option<&str>, as_of: DateTime<Utc>) -> Result<Table> {
            self.calls
                .lock()
                .unwrap()
                .push((code.map(str::to_string), as_of.timestamp_millis()));
            Ok(Table::empty())
        }
    }

    #[tokio::test]
    async fn forwards_to_inner_and_logs_start_and_end() {
        let (counter, _guard) = capture_levels();
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let p = Logged::new(RecordingProvider::default());

        p.fetch_by_name(Some("omega"), FetchOptions::as_of(as_of))
            .await
            .unwrap();

        assert_eq!(p.provider_name(), "recording");
        assert_eq!(
            *p.inner().calls.lock().unwrap(),
            vec![(Some("12".to_string()), as_of.timestamp_millis())]
        );
        assert_eq!(counter.count(Level::DEBUG), 2);
    }

    #[tokio::test]
    async fn default_resolution_warns_and_passes_no_code() {
        let (counter, _guard) = capture_levels();
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let p = Logged::new(RecordingProvider::default());

        p.fetch_by_name(Some("swatch"), FetchOptions::as_of(as_of))
            .await
            .unwrap();

        assert_eq!(counter.count(Level::WARN), 1);
        assert_eq!(p.into_inner().calls.into_inner().unwrap()[0].0, None);
    }
}
