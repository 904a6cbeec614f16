use reqwest::Client;
use std::time::Duration;

use crate::error::GatewayError;

/// Sent on every request. The chart API refuses clients without a
/// browser-like agent string.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; trendalert/0.1)";

/// Build the shared HTTP client with a bounded timeout for every request
pub fn http_client(timeout: Duration) -> Result<Client, GatewayError> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()?;
    Ok(client)
}
