//! Top-N selection and SVG rendering

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::types::{ChartBar, ChartError};
use crate::logic::activity::ActivityProfile;
use crate::logic::IpMap;

// ============================================================================
// SELECTION
// ============================================================================

/// Busiest `n` IPs by total requests, ties broken by IP ascending
pub fn top_by_requests(suspicious: &IpMap<ActivityProfile>, n: usize) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = suspicious
        .iter()
        .map(|(ip, profile)| ChartBar {
            ip: ip.clone(),
            total_requests: profile.total_requests,
            alert_requests: profile.alert_requests,
        })
        .collect();

    bars.sort_by(|a, b| b.total_requests.cmp(&a.total_requests).then_with(|| a.ip.cmp(&b.ip)));
    bars.truncate(n);
    bars
}

// ============================================================================
// RENDERING
// ============================================================================

pub trait ChartRenderer {
    fn render(&self, bars: &[ChartBar], title: &str, path: &Path) -> Result<(), ChartError>;
}

const TOTAL_COLOR: &str = "#3b82f6";
const ALERT_COLOR: &str = "#ef4444";

/// Stacked bar chart as a standalone SVG document
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self { width: 1120, height: 400 }
    }
}

impl SvgChartRenderer {
    pub fn to_svg(&self, bars: &[ChartBar], title: &str) -> String {
        let (w, h) = (self.width as f64, self.height as f64);
        let (left, right, top, bottom) = (70.0, 20.0, 50.0, 60.0);
        let plot_w = w - left - right;
        let plot_h = h - top - bottom;

        let max = bars.iter().map(ChartBar::height).max().unwrap_or(0).max(1) as f64;
        let slot = plot_w / bars.len().max(1) as f64;
        let bar_w = slot * 0.6;
        let baseline = top + plot_h;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="sans-serif">"#,
            self.width, self.height, self.width, self.height
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="30" font-size="18" text-anchor="middle">{}</text>"#,
            w / 2.0,
            escape(title)
        );

        // Axes
        let _ = writeln!(
            svg,
            r#"<line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{baseline:.1}" stroke="black"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{left:.1}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="black"/>"#,
            w - right
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            left - 6.0,
            top + 4.0,
            max as u64
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">0</text>"#,
            left - 6.0,
            baseline + 4.0
        );

        for (i, bar) in bars.iter().enumerate() {
            let x = left + slot * i as f64 + (slot - bar_w) / 2.0;
            let total_h = bar.total_requests as f64 / max * plot_h;
            let alert_h = bar.alert_requests as f64 / max * plot_h;

            let _ = writeln!(
                svg,
                r#"<rect class="total" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x,
                baseline - total_h,
                bar_w,
                total_h,
                TOTAL_COLOR
            );
            if bar.alert_requests > 0 {
                let _ = writeln!(
                    svg,
                    r#"<rect class="alerts" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                    x,
                    baseline - total_h - alert_h,
                    bar_w,
                    alert_h,
                    ALERT_COLOR
                );
            }
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
                x + bar_w / 2.0,
                baseline + 18.0,
                escape(&bar.ip)
            );
        }

        // Legend
        let legend_x = w - right - 120.0;
        let _ = writeln!(
            svg,
            r#"<rect x="{legend_x:.1}" y="40" width="12" height="12" fill="{TOTAL_COLOR}"/><text x="{:.1}" y="50" font-size="12">Total</text>"#,
            legend_x + 18.0
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{legend_x:.1}" y="58" width="12" height="12" fill="{ALERT_COLOR}"/><text x="{:.1}" y="68" font-size="12">Alerts</text>"#,
            legend_x + 18.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">IP addresses</text>"#,
            left + plot_w / 2.0,
            h - 15.0
        );
        svg.push_str("</svg>\n");
        svg
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, bars: &[ChartBar], title: &str, path: &Path) -> Result<(), ChartError> {
        if bars.is_empty() {
            return Err(ChartError::NoData);
        }

        let io_err = |source| ChartError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_svg(bars, title)).map_err(io_err)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
