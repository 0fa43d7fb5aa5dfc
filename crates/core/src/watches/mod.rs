pub mod logged;
pub mod provider;
pub mod table;
pub mod transport;

pub use logged::Logged;
pub use provider::{FetchOptions, RequestTarget, UnknownBrandPolicy, WatchChartsProvider, WatchDataProvider};
pub use table::{ChartPoint, Table};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

#[cfg(test)]
pub(crate) mod test_support {
    use super::transport::{HttpResponse, HttpTransport};
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};

    /// Answers every GET with the same canned response and records the URLs.
    pub struct StubTransport {
        status: StatusCode,
        body: String,
        requests: Mutex<Vec<String>>,
    }

    impl StubTransport {
        pub fn ok(body: &str) -> Self {
            Self::with_status(StatusCode::OK, body)
        }

        pub fn with_status(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl HttpTransport for StubTransport {
        async fn get(&self, url: &str) -> anyhow::Result<HttpResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    pub struct FailingTransport;

    #[async_trait::async_trait]
    impl HttpTransport for FailingTransport {
        async fn get(&self, _url: &str) -> anyhow::Result<HttpResponse> {
            anyhow::bail!("connection refused")
        }
    }

    /// Counts tracing events per level.
    #[derive(Clone, Default)]
    pub struct LevelCounter {
        counts: Arc<Mutex<HashMap<Level, usize>>>,
    }

    impl LevelCounter {
        pub fn count(&self, level: Level) -> usize {
            self.counts.lock().unwrap().get(&level).copied().unwrap_or(0)
        }
    }

    impl<S: Subscriber> Layer<S> for LevelCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            *self
                .counts
                .lock()
                .unwrap()
                .entry(*event.metadata().level())
                .or_default() += 1;
        }
    }

    pub fn capture_levels() -> (LevelCounter, tracing::subscriber::DefaultGuard) {
        use tracing_subscriber::layer::SubscriberExt;

        let counter = LevelCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (counter, guard)
    }
}
