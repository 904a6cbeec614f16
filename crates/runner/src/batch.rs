//! Batch - one pass over every configured instrument
//!
//! Instruments are processed sequentially. A failure is caught at the
//! instrument boundary, logged with its stage, recorded in the report and the
//! loop moves on.

use std::sync::Arc;
use tracing::{debug, error, info, warn};
use trendalert_core::{
    AlertPolicy, EvaluationError, EvaluationResult, ModelPair, PriceSeries, TrendEngine,
};
use trendalert_ports::{
    ChartRenderer, ChartRequest, Clock, DateWindow, DeliveryError, Notification, Notifier,
    PriceSource,
};

use crate::config::RunConfiguration;
use crate::notification::build_alert;
use crate::report::{BatchReport, DeliveryOutcome, InstrumentOutcome, Stage};

/// Runs the forecast-and-deviation pipeline for a batch of instruments
pub struct BatchRunner {
    config: RunConfiguration,
    engine: TrendEngine,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn ChartRenderer>,
    clock: Arc<dyn Clock>,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(
        config: RunConfiguration,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn ChartRenderer>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, trendalert_core::FitError> {
        let policy =
            AlertPolicy::new(config.z_score_threshold).with_score_basis(config.score_basis);
        let engine = TrendEngine::new(config.polynomial_degree, policy)?;

        Ok(Self {
            config,
            engine,
            source,
            notifier,
            renderer,
            clock,
            dry_run: false,
        })
    }

    /// Evaluate and log decisions without rendering or notifying
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// Process every instrument in configuration order
    pub async fn run(&self) -> BatchReport {
        let window = DateWindow::trailing(self.clock.today(), self.config.window_days);
        info!(
            "Evaluating {} instruments over {} (source: {}, degree {}, threshold {:.2}, basis {})",
            self.config.symbols.len(),
            window,
            self.source.name(),
            self.engine.degree(),
            self.config.z_score_threshold,
            self.config.score_basis
        );

        let mut report = BatchReport::default();
        for symbol in &self.config.symbols {
            let outcome = self.process(symbol, window).await;
            if let InstrumentOutcome::Failed {
                symbol,
                stage,
                error,
            } = &outcome
            {
                error!("{} failed at {} stage: {}", symbol, stage, error);
            }
            report.push(outcome);
        }

        info!("Batch complete: {}", report);
        report
    }

    async fn process(&self, symbol: &str, window: DateWindow) -> InstrumentOutcome {
        let failed = |stage: Stage, error: String| InstrumentOutcome::Failed {
            symbol: symbol.to_string(),
            stage,
            error,
        };

        let closes = match self.source.daily_closes(symbol, window).await {
            Ok(closes) => closes,
            Err(e) => return failed(Stage::Ingestion, e.to_string()),
        };
        let series = match PriceSeries::from_closes(closes) {
            Ok(series) => series,
            Err(e) => return failed(Stage::Ingestion, e.to_string()),
        };
        debug!("{}: {} closes", symbol, series.len());

        let evaluation = match self.engine.evaluate(symbol, &series) {
            Ok(evaluation) => evaluation,
            Err(EvaluationError::Fit(e)) => return failed(Stage::Fit, e.to_string()),
            Err(EvaluationError::Degenerate(e)) => {
                return failed(Stage::Evaluation, e.to_string());
            }
        };

        let result = evaluation.result;
        let decision = evaluation.decision;
        info!(
            "{}: last {:.2}, linear {:.2}, poly {:.2}, score {} -> {}",
            symbol,
            result.last_close,
            result.linear_forecast,
            result.polynomial_forecast,
            result.standardized_score,
            decision.reason()
        );

        let delivery = if !decision.is_emit() {
            DeliveryOutcome::NotAttempted
        } else if self.dry_run {
            info!("{}: dry run, notification skipped", symbol);
            DeliveryOutcome::NotAttempted
        } else {
            self.notify(&result, &series, &evaluation.models).await
        };

        InstrumentOutcome::Evaluated {
            result,
            decision,
            delivery,
        }
    }

    /// Render the chart and deliver, falling back to text only once when the
    /// full notification carried a chart
    async fn notify(
        &self,
        result: &EvaluationResult,
        series: &PriceSeries,
        models: &ModelPair,
    ) -> DeliveryOutcome {
        let symbol = result.symbol.as_str();
        let chart = match self
            .renderer
            .render(&ChartRequest::new(symbol, series, models))
        {
            Ok(chart) => Some(chart),
            Err(e) => {
                warn!("{} {} stage: {}, sending without chart", symbol, Stage::Render, e);
                None
            }
        };
        let with_chart = chart.is_some();

        let notification = build_alert(&self.config.notification_target, result, chart);
        let error = match self.deliver(&notification).await {
            Ok(()) => {
                info!("{}: notification delivered via {}", symbol, self.notifier.name());
                return DeliveryOutcome::Delivered { with_chart };
            }
            Err(e) => e,
        };

        // Without a chart there is nothing to strip for a degraded retry
        if !with_chart {
            error!("{} {} stage: {}", symbol, Stage::Delivery, error);
            return DeliveryOutcome::Failed {
                error: error.to_string(),
            };
        }
        warn!(
            "{} {} stage: {}, retrying as text only",
            symbol,
            Stage::Delivery,
            error
        );

        match self.deliver(&notification.text_only()).await {
            Ok(()) => {
                info!("{}: degraded notification delivered", symbol);
                DeliveryOutcome::Degraded {
                    error: error.to_string(),
                }
            }
            Err(e) => {
                error!("{} {} stage: degraded attempt failed: {}", symbol, Stage::Delivery, e);
                DeliveryOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let status = self.notifier.deliver(notification).await?.into_result()?;
        debug!("Endpoint {} answered {}", notification.target, status.code);
        Ok(())
    }
}
