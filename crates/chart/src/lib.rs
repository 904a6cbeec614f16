//! Trendalert Chart
//!
//! Renders the comparison chart attached to notifications: actual closes
//! (red), polynomial trend (blue) and linear trend (green) over the window.
//!
//! Text (caption, axis labels, legend) is only drawn when the crate is built
//! with the `fonts` feature, which pulls in a system font backend. Without
//! it the chart contains the three lines on a plain background.

mod renderer;

pub use renderer::{DEFAULT_FILE_NAME, PlottersChartRenderer};
