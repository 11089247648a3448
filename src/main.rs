#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod config;
mod flow_control;
mod http_handler;
mod keychain;
mod logger;
mod shell;

use crate::config::Config;
use crate::keychain::Keychain;
use crate::shell::Shell;

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let keychain = Keychain::new(&config);
    info!("Using booking API at {}", keychain.client().url());
    if config.api_token.is_none() {
        warn!("No API token configured, requests are sent unauthenticated");
    }
    Shell::new(keychain.api(), config.restaurant).run().await;
}
