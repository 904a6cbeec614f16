use plotters::prelude::*;
use std::path::Path;
use tracing::debug;
use trendalert_ports::{ChartRenderer, ChartRequest, RenderError, RenderedChart};

/// Attachment name used when none is configured
pub const DEFAULT_FILE_NAME: &str = "stockplot.png";

const BACKGROUND: RGBColor = RGBColor(0xab, 0xab, 0xab);
const ACTUAL: RGBColor = RED;
const POLYNOMIAL: RGBColor = BLUE;
const LINEAR: RGBColor = GREEN;

/// PNG renderer backed by plotters' bitmap backend
///
/// Plotters writes bitmaps to a path, so each render goes through a
/// temporary file that is removed once its bytes are read back.
#[derive(Debug, Clone)]
pub struct PlottersChartRenderer {
    width: u32,
    height: u32,
    labels: bool,
    file_name: String,
}

impl Default for PlottersChartRenderer {
    fn default() -> Self {
        Self::new(1600, 900)
    }
}

impl PlottersChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: true,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    /// Toggle caption, axis labels and legend (needs the `fonts` feature)
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    fn draws_text(&self) -> bool {
        self.labels && cfg!(feature = "fonts")
    }

    fn draw(
        &self,
        request: &ChartRequest<'_>,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let n = request.series.len() as f64;
        let (lo, hi) = request.value_range();
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.draws_text() {
            builder
                .caption(
                    format!("{} - actual vs. regression", request.symbol),
                    ("sans-serif", 30).into_font(),
                )
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder.build_cartesian_2d(0.5..n + 0.5, (lo - pad)..(hi + pad))?;

        if self.draws_text() {
            chart
                .configure_mesh()
                .x_desc("Days")
                .y_desc("Price")
                .draw()?;
        }

        let lines = [
            ("Actual", request.actual_points(), ACTUAL),
            ("PolyReg", request.polynomial_points(), POLYNOMIAL),
            ("LinReg", request.linear_points(), LINEAR),
        ];

        for (label, points, color) in lines {
            chart
                .draw_series(LineSeries::new(
                    points.into_iter().map(|(x, y)| (x as f64, y)),
                    color.stroke_width(2),
                ))?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        if self.draws_text() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for PlottersChartRenderer {
    fn render(&self, request: &ChartRequest<'_>) -> Result<RenderedChart, RenderError> {
        let file = tempfile::Builder::new()
            .prefix("trendalert-")
            .suffix(".png")
            .tempfile()?;

        self.draw(request, file.path())
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        let png = std::fs::read(file.path())?;
        debug!(
            "Rendered {}x{} chart for {} ({} bytes)",
            self.width,
            self.height,
            request.symbol,
            png.len()
        );

        Ok(RenderedChart {
            file_name: self.file_name.clone(),
            png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendalert_core::{ModelFitter, PriceSeries};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_renders_png() {
        let closes = [
            100.0, 101.5, 100.8, 102.2, 103.9, 103.1, 104.6, 106.0, 105.2, 101.0,
        ];
        let series = PriceSeries::from_closes(closes).unwrap();
        let models = ModelFitter::new(3).unwrap().fit(&series).unwrap();
        let request = ChartRequest::new("TEST", &series, &models);

        let renderer = PlottersChartRenderer::new(320, 200)
            .with_labels(false)
            .with_file_name("chart.png");
        let chart = renderer.render(&request).unwrap();

        assert_eq!(chart.file_name, "chart.png");
        assert!(chart.png.len() > PNG_MAGIC.len());
        assert_eq!(chart.png[..8], PNG_MAGIC);
    }

    #[test]
    fn test_flat_series_still_renders() {
        let series = PriceSeries::from_closes([50.0; 6]).unwrap();
        let models = ModelFitter::new(2).unwrap().fit(&series).unwrap();
        let request = ChartRequest::new("FLAT", &series, &models);

        let chart = PlottersChartRenderer::new(200, 120)
            .with_labels(false)
            .render(&request)
            .unwrap();
        assert_eq!(chart.file_name, DEFAULT_FILE_NAME);
        assert_eq!(chart.png[..8], PNG_MAGIC);
    }
}
