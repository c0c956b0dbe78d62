use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads `HABIT_API_URL` and `HABIT_API_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("HABIT_API_URL").ok(),
            env::var("HABIT_API_TIMEOUT_MS").ok(),
        )
    }

    pub fn from_vars(base_url: Option<String>, timeout_ms: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let timeout = timeout_ms
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self { base_url, timeout }
    }
}
