use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// This client is used for making REST API calls to the booking backend.
/// It sets a fixed per-request deadline and, when a bearer credential is
/// configured, attaches it to every outgoing request.
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL for the API, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL, optional
    /// bearer credential and per-request deadline.
    ///
    /// Both the base URL and the credential are fixed for the lifetime of
    /// the client; there is no runtime renegotiation.
    pub fn new(base_url: &str, api_token: Option<&str>, timeout: Duration) -> HTTPClient {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = api_token {
            if let Ok(mut value) =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            {
                value.set_sensitive(true);
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }
        HTTPClient {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()
                .unwrap_or_else(|e| crate::fatal!("Could not build HTTP client: {e}")),
            base_url: String::from(base_url),
        }
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub fn url(&self) -> &str { self.base_url.as_str() }
}
