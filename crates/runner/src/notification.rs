//! Alert message formatting

use trendalert_core::EvaluationResult;
use trendalert_ports::{Attachment, Embed, Notification, NotificationTarget, RenderedChart};

/// Embed accent color
pub const EMBED_COLOR: u32 = 0x03b2f8;

/// Build the buy alert for an emitted evaluation
///
/// The chart, when present, is attached and shown inside the embed.
pub fn build_alert(
    target: &NotificationTarget,
    result: &EvaluationResult,
    chart: Option<RenderedChart>,
) -> Notification {
    let description = format!(
        "Last price: ${:.2}\nPredicted price: ${:.2}\nZ-Score: {}",
        result.last_close, result.polynomial_forecast, result.standardized_score
    );

    let notification = Notification::new(
        target.clone(),
        format!("It's a great time to buy {}", result.symbol),
    );

    match chart {
        Some(chart) => notification
            .with_embed(Embed {
                title: result.symbol.clone(),
                description,
                color: EMBED_COLOR,
                image_attachment: Some(chart.file_name.clone()),
            })
            .with_attachment(Attachment {
                file_name: chart.file_name,
                bytes: chart.png,
            }),
        None => notification.with_embed(Embed {
            title: result.symbol.clone(),
            description,
            color: EMBED_COLOR,
            image_attachment: None,
        }),
    }
}
