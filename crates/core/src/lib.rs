pub mod domain;
pub mod engine;
pub mod entropy;
pub mod error;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 5001;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub production: bool,
        pub debug: bool,
        pub insight_seed: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let port = match lookup("PORT").filter(|s| !s.trim().is_empty()) {
                Some(s) => s
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {s:?})"))?,
                None => DEFAULT_PORT,
            };

            let production = ["FLASK_ENV", "ENVIRONMENT"]
                .iter()
                .any(|key| lookup(key).as_deref() == Some("production"));

            // Production always wins over DEBUG.
            let debug = !production
                && lookup("DEBUG")
                    .map(|s| s.trim().eq_ignore_ascii_case("true"))
                    .unwrap_or(false);

            let insight_seed = match lookup("INSIGHT_SEED").filter(|s| !s.trim().is_empty()) {
                Some(s) => Some(
                    s.trim()
                        .parse::<u64>()
                        .with_context(|| format!("INSIGHT_SEED must be an unsigned integer (got {s:?})"))?,
                ),
                None => None,
            };

            Ok(Self {
                port,
                production,
                debug,
                insight_seed,
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }

        /// Log filter used when `RUST_LOG` is not set.
        pub fn default_log_filter(&self) -> &'static str {
            if self.debug {
                "debug"
            } else {
                "info"
            }
        }
    }

}
