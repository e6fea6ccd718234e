//! Visualize Module - Top-N Activity Chart
//!
//! # Components
//! - `types.rs`: ChartBar, ChartError
//! - `chart.rs`: top-N selection, `ChartRenderer`, SVG renderer
//! - `stage.rs`: pipeline stage

pub mod types;
pub mod chart;
pub mod stage;


pub use types::{ChartBar, ChartError};
pub use chart::{top_by_requests, ChartRenderer, SvgChartRenderer};
pub use stage::VisualizerStage;
