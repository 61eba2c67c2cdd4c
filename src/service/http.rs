use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("seoscope/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Factory for the crate's outbound HTTP clients. Every fetcher and probe
/// goes through here so timeout and identification stay uniform.
pub fn create_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}
