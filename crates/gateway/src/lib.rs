//! Trendalert Gateway
//!
//! HTTP adapters for the external collaborators of the evaluation engine:
//! - Market data in: Yahoo Finance chart API ([`YahooPriceSource`])
//! - Notifications out: Discord-style webhooks ([`DiscordNotifier`])
//!
//! ## Architecture
//!
//! ```text
//!  Yahoo chart API          Discord webhook
//!        │                        ▲
//!   ┌────▼────┐              ┌────┴────┐
//!   │ Gateway │              │ Gateway │
//!   │   In    │              │   Out   │
//!   └────┬────┘              └────▲────┘
//!        │ PriceSource            │ Notifier
//!   ┌────▼────────────────────────┴────┐
//!   │              Runner              │
//!   └──────────────────────────────────┘
//! ```
//!
//! Both adapters share one `reqwest::Client` built by [`http_client`], which
//! carries the request timeout for every call.

pub mod adapters;
pub mod client;
pub mod error;

// Re-export commonly used types
pub use adapters::{DiscordNotifier, YAHOO_BASE_URL, YahooPriceSource, parse_base_url};
pub use client::{DEFAULT_USER_AGENT, http_client};
pub use error::GatewayError;
