use serde::Serialize;
use std::fmt;

use crate::history::RollingHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "↑",
            TrendDirection::Decreasing => "↓",
            TrendDirection::Stable => "→",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Direction between the two newest samples. Fewer than two samples is stable.
pub fn direction(history: &RollingHistory<i64>) -> TrendDirection {
    match history.last_n(2).as_slice() {
        [previous, latest] if latest > previous => TrendDirection::Increasing,
        [previous, latest] if latest < previous => TrendDirection::Decreasing,
        _ => TrendDirection::Stable,
    }
}
