//! Visualize Types

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// One bar: total requests with alerts stacked on top
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub ip: String,
    pub total_requests: u64,
    pub alert_requests: u64,
}

impl ChartBar {
    pub fn height(&self) -> u64 {
        self.total_requests + self.alert_requests
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to draw")]
    NoData,

    #[error("failed to write chart {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
