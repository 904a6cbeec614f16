//! In-memory collaborators shared by the runner integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use trendalert_ports::{
    ChartRenderer, ChartRequest, DateWindow, DeliveryError, DeliveryStatus, IngestionError,
    Notification, Notifier, PriceSource, RenderError, RenderedChart,
};

pub struct FakeSource {
    closes: HashMap<String, Result<Vec<f64>, IngestionError>>,
    pub windows: Mutex<Vec<DateWindow>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            closes: HashMap::new(),
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, symbol: &str, closes: Result<Vec<f64>, IngestionError>) -> Self {
        self.closes.insert(symbol.to_string(), closes);
        self
    }
}

#[async_trait]
impl PriceSource for FakeSource {
    async fn daily_closes(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<Vec<f64>, IngestionError> {
        self.windows.lock().unwrap().push(window);
        self.closes
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| {
                Err(IngestionError::InvalidInstrument {
                    symbol: symbol.to_string(),
                    reason: "unknown".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Records every notification and answers from a script (204 when exhausted)
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    script: Mutex<VecDeque<Result<u16, DeliveryError>>>,
}

impl RecordingNotifier {
    pub fn answering(script: Vec<Result<u16, DeliveryError>>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryStatus, DeliveryError> {
        self.sent.lock().unwrap().push(notification.clone());
        let code = self.script.lock().unwrap().pop_front().unwrap_or(Ok(204))?;
        Ok(DeliveryStatus {
            code,
            body: String::new(),
        })
    }
}

pub struct FakeRenderer {
    pub fail: bool,
}

impl ChartRenderer for FakeRenderer {
    fn render(&self, request: &ChartRequest<'_>) -> Result<RenderedChart, RenderError> {
        if self.fail {
            return Err(RenderError::Backend("no backend".to_string()));
        }
        Ok(RenderedChart {
            file_name: "stockplot.png".to_string(),
            png: request.symbol.as_bytes().to_vec(),
        })
    }
}

/// Rising line ending in a drop: emits at threshold 0.1
pub fn dropping() -> Vec<f64> {
    let mut closes: Vec<f64> = (10..=20).map(f64::from).collect();
    closes.push(12.0);
    closes
}

/// Rising line ending in a spike: the linear forecast sits below the last close
pub fn spiking() -> Vec<f64> {
    let mut closes: Vec<f64> = (10..=20).map(f64::from).collect();
    closes.push(40.0);
    closes
}
