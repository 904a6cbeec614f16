//! Error types for the gateway crate

use thiserror::Error;
use trendalert_ports::{DeliveryError, IngestionError};

/// Gateway-level errors (adapter construction and HTTP plumbing)
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Convert infrastructure errors to the market data port's error
impl From<GatewayError> for IngestionError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http(e) => IngestionError::Transport(describe(&e)),
            GatewayError::InvalidUrl(url) => IngestionError::Transport(url),
        }
    }
}

/// Convert infrastructure errors to the notification port's error
impl From<GatewayError> for DeliveryError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http(e) => DeliveryError::Transport(describe(&e)),
            GatewayError::InvalidUrl(url) => DeliveryError::Transport(url),
        }
    }
}

/// reqwest errors hide the timeout flag inside the message chain
pub(crate) fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
