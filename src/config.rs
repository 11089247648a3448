use std::env;
use std::time::Duration;

/// Default per-request deadline in seconds, used when `TABLEBOOK_TIMEOUT_SECS`
/// is unset or unparsable.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process-wide configuration, read once at startup from the environment.
///
/// There is no runtime reconfiguration: the base address and the bearer
/// credential are fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the booking API, prepended to all endpoint paths.
    pub base_url: String,
    /// Optional bearer credential sent as an `Authorization` header.
    pub api_token: Option<String>,
    /// Restaurant identifier substituted into every endpoint path.
    pub restaurant: String,
    /// Deadline applied to every outgoing request.
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let base_url = env::var("TABLEBOOK_BASE_URL")
            .unwrap_or_else(|_| String::from("http://localhost:8547"));
        let api_token = env::var("TABLEBOOK_API_TOKEN").ok().filter(|t| !t.is_empty());
        let restaurant = env::var("TABLEBOOK_RESTAURANT")
            .unwrap_or_else(|_| String::from("TheHungryUnicorn"));
        let timeout_secs = env::var("TABLEBOOK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            api_token,
            restaurant,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
