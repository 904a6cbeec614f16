use thiserror::Error;

/// Failure to obtain a usable price history for an instrument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestionError {
    #[error("no price data for {symbol} in the requested window")]
    NoData { symbol: String },

    #[error("invalid instrument {symbol}: {reason}")]
    InvalidInstrument { symbol: String, reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure to hand a notification to the messaging endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint rejected notification with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Failure to rasterize a chart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("chart backend error: {0}")]
    Backend(String),

    #[error("chart file error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err.to_string())
    }
}
