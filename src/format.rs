use std::time::Duration;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const STEP: f64 = 1024.0;

/// Formats a byte count with the largest binary unit that keeps the value
/// below 1024, clamping at YB. Always two decimals.
pub fn format_bytes(num: f64) -> String {
    let mut value = num;
    let mut unit = 0;

    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

/// Same as [`format_bytes`] with a per-second suffix.
pub fn format_rate(num: f64) -> String {
    format!("{}/s", format_bytes(num))
}

/// Converts a per-tick byte delta to bytes per second for a tick of
/// `interval`. A zero interval is treated as one second.
pub fn per_second(per_tick: i64, interval: Duration) -> f64 {
    let secs = interval.as_secs_f64();
    if secs > 0.0 {
        per_tick as f64 / secs
    } else {
        per_tick as f64
    }
}

/// Wall-clock span covered by `samples` ticks, e.g. `60` or `7.5`.
pub fn format_span(samples: usize, interval: Duration) -> String {
    let secs = samples as f64 * interval.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{:.0}", secs)
    } else {
        format!("{:.1}", secs)
    }
}
