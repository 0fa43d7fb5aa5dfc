pub mod brands;
pub mod error;
pub mod time;
pub mod watches;

pub mod config {
    use crate::watches::provider::UnknownBrandPolicy;
    use anyhow::Context;

    pub const DEFAULT_BASE_URL: &str = "https://watchcharts.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub base_url: String,
        pub timeout_secs: u64,
        pub unknown_brand_policy: UnknownBrandPolicy,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                unknown_brand_policy: UnknownBrandPolicy::default(),
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let base_url = std::env::var("WATCHCHARTS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

            let timeout_secs = match std::env::var("WATCHCHARTS_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("WATCHCHARTS_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            };

            let strict = std::env::var("WATCHCHARTS_STRICT_BRANDS")
                .map(|s| parse_flag(&s))
                .unwrap_or(false);
            let unknown_brand_policy = if strict {
                UnknownBrandPolicy::Reject
            } else {
                UnknownBrandPolicy::FallBackToIndex
            };

            Ok(Self {
                base_url,
                timeout_secs,
                unknown_brand_policy,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }

    fn parse_flag(s: &str) -> bool {
        matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    }

}
