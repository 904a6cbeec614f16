//! Trendalert Runner - Batch Orchestration
//!
//! Wires the evaluation engine to its collaborators for one run:
//!
//! - **Config**: TOML file -> validated [`RunConfiguration`]
//! - **Batch**: sequential per-instrument pipeline with failure isolation
//! - **Notification**: alert text, embed and chart attachment
//! - **Report**: per-instrument outcomes collected into a [`BatchReport`]
//! - **Cli**: arguments and exit codes for the `trendalert` binary
//!
//! ## Pipeline
//!
//! ```text
//!   PriceSource ──closes──► TrendEngine ──Decision──┐
//!                                                   │ emit
//!                                   ChartRenderer ◄─┤
//!                                                   ▼
//!                                               Notifier
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod notification;
pub mod report;

// Re-export main types
pub use batch::BatchRunner;
pub use cli::{Args, Collaborators, EXIT_CONFIG, EXIT_OK};
pub use config::{
    ConfigError, ConfigFile, RunConfiguration, TEMPLATE, load_config, load_config_from_str,
    load_or_create,
};
pub use notification::build_alert;
pub use report::{BatchReport, DeliveryOutcome, InstrumentOutcome, Stage};
