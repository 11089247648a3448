use crate::config::Config;
use crate::flow_control::api::{BookingApi, LiveBookingApi};
use crate::http_handler::http_client::HTTPClient;
use std::sync::Arc;

/// Bundles the shared subsystems of the application: the HTTP client and
/// the live booking API facade built on top of it.
#[derive(Clone)]
pub struct Keychain {
    /// The HTTP client for performing network requests.
    client: Arc<HTTPClient>,
    /// The live booking API bound to the configured restaurant.
    api: Arc<LiveBookingApi>,
}

impl Keychain {
    pub fn new(config: &Config) -> Self {
        let client = Arc::new(HTTPClient::new(
            &config.base_url,
            config.api_token.as_deref(),
            config.timeout,
        ));
        let api = Arc::new(LiveBookingApi::new(Arc::clone(&client), config.restaurant.clone()));
        Self { client, api }
    }

    /// Provides a cloned reference to the HTTP client.
    pub fn client(&self) -> Arc<HTTPClient> { Arc::clone(&self.client) }

    /// Provides the booking API as a shared trait object.
    pub fn api(&self) -> Arc<dyn BookingApi> { self.api.clone() }
}
