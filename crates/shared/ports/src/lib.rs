//! Trendalert Ports
//!
//! Port definitions (traits) for the external collaborators of the
//! evaluation engine. These define the boundaries between domain logic and
//! infrastructure: market data in, notifications and charts out.

mod chart;
mod clock;
mod error;
mod market_data;
mod notifier;

pub use chart::{ChartRenderer, ChartRequest, RenderedChart};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DeliveryError, IngestionError, RenderError};
pub use market_data::{DateWindow, PriceSource};
pub use notifier::{
    Attachment, DeliveryStatus, Embed, Notification, NotificationTarget, Notifier,
};
