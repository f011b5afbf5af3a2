use std::time::Duration;

use crate::format::{format_rate, per_second};

pub const PLACEHOLDER: &str = "No data yet...";
pub const NO_ACTIVITY: &str = "No activity";

const FILLED: char = '█';
const EMPTY: char = ' ';

/// Output of [`GraphRenderer::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Graph {
    /// Fewer than two samples: one padded placeholder row.
    Placeholder(String),
    Plot(Plot),
}

/// A framed bar chart: borders, `height` content rows and a scale caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub top: String,
    pub rows: Vec<String>,
    pub bottom: String,
    pub caption: String,
    pub min: i64,
    pub max: i64,
}

impl Graph {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Graph::Placeholder(row) => vec![row.clone()],
            Graph::Plot(plot) => {
                let mut lines = Vec::with_capacity(plot.rows.len() + 3);
                lines.push(plot.top.clone());
                lines.extend(plot.rows.iter().cloned());
                lines.push(plot.bottom.clone());
                lines.push(plot.caption.clone());
                lines
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Graph::Placeholder(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GraphRenderer {
    width: usize,
    height: usize,
    interval: Duration,
}

impl GraphRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_interval(width, height, Duration::from_secs(1))
    }

    /// Renderer for series sampled every `interval`; the caption is
    /// reported per second.
    pub fn with_interval(width: usize, height: usize, interval: Duration) -> Self {
        Self { width, height, interval }
    }

    pub fn render(&self, series: &[i64]) -> Graph {
        render_with_interval(series, self.width, self.height, self.interval)
    }
}

/// Renders `series` (oldest first) as a `width` x `height` bar grid scaled
/// between its minimum and maximum. Samples are taken to be one second apart.
pub fn render(series: &[i64], width: usize, height: usize) -> Graph {
    render_with_interval(series, width, height, Duration::from_secs(1))
}

pub fn render_with_interval(series: &[i64], width: usize, height: usize, interval: Duration) -> Graph {
    if series.len() < 2 {
        return Graph::Placeholder(format!("{:<width$}", PLACEHOLDER, width = width));
    }

    let min_val = series.iter().copied().min().unwrap_or(0);
    let observed_max = series.iter().copied().max().unwrap_or(0);
    let max_val = if observed_max == min_val {
        min_val.saturating_add(1)
    } else {
        observed_max
    };

    let columns = width.min(series.len());
    let rows = (0..height)
        .map(|i| {
            let threshold = threshold(min_val, max_val, i, height);
            let mut line = String::with_capacity(width + 2);
            line.push('│');
            for value in &series[..columns] {
                line.push(if *value as f64 >= threshold { FILLED } else { EMPTY });
            }
            line.extend(std::iter::repeat(EMPTY).take(width - columns));
            line.push('│');
            line
        })
        .collect();

    let caption = if observed_max > 0 {
        format!("Max: {}", format_rate(per_second(observed_max, interval)))
    } else {
        NO_ACTIVITY.to_string()
    };

    Graph::Plot(Plot {
        top: format!("┌{}┐", "─".repeat(width)),
        rows,
        bottom: format!("└{}┘", "─".repeat(width)),
        caption,
        min: min_val,
        max: max_val,
    })
}

/// Lower bound of band `row`; row 0 is the highest band.
fn threshold(min_val: i64, max_val: i64, row: usize, height: usize) -> f64 {
    if height <= 1 {
        return min_val as f64;
    }
    let span = max_val as f64 - min_val as f64;
    min_val as f64 + span * (height - row - 1) as f64 / (height - 1) as f64
}
