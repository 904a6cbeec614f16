//! Provider adapters
//!
//! Adapters translate provider wire formats to the port types (Gateway In)
//! and port types to provider requests (Gateway Out).

pub mod discord;
pub mod yahoo;

pub use discord::DiscordNotifier;
pub use yahoo::{DEFAULT_BASE_URL as YAHOO_BASE_URL, YahooPriceSource, parse_base_url};
