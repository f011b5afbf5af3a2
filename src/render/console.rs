use chrono::Local;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::time::Duration;

use super::graph::GraphRenderer;
use crate::engine::InterfaceView;
use crate::error::Result;
use crate::format::{format_bytes, format_rate, format_span, per_second};

const RULE_WIDTH: usize = 80;

/// Builds the text report for one tick. Rates are shown per second whatever
/// the sampling interval.
pub struct ConsoleReport {
    renderer: GraphRenderer,
    interval: Duration,
}

impl ConsoleReport {
    pub fn new(graph_width: usize, graph_height: usize, interval: Duration) -> Self {
        Self {
            renderer: GraphRenderer::with_interval(graph_width, graph_height, interval),
            interval,
        }
    }

    pub fn lines(&self, views: &[InterfaceView], monitored_count: usize) -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("NetWatch - Network Monitor - {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            format!("Monitoring {} interface(s)", monitored_count),
            rule.clone(),
        ];

        for view in views {
            lines.extend(self.interface_lines(view));
        }

        lines.push(String::new());
        lines.push(rule.clone());
        lines.push("Press Ctrl+C to stop monitoring".to_string());
        lines.push(rule);
        lines
    }

    pub fn interface_lines(&self, view: &InterfaceView) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!("Interface: {}", view.name),
            "   Real-time:".to_string(),
            format!("     Sent: {} {}", format_rate(per_second(view.current_sent_rate, self.interval)), view.sent_trend.arrow()),
            format!("     Recv: {} {}", format_rate(per_second(view.current_recv_rate, self.interval)), view.recv_trend.arrow()),
            "   Cumulative:".to_string(),
            format!("     Total Sent: {}", format_bytes(view.total_sent as f64)),
            format!("     Total Recv: {}", format_bytes(view.total_recv as f64)),
        ];

        if view.sent_history.len() >= 2 {
            let sections = [
                ("Sent", &view.sent_history),
                ("Received", &view.recv_history),
            ];
            for (label, series) in sections {
                lines.push(String::new());
                lines.push(format!(
                    "   {} Traffic (last {} seconds):",
                    label,
                    format_span(series.len(), self.interval)
                ));
                lines.extend(self.renderer.render(series)
                    .lines()
                    .into_iter()
                    .map(|line| format!("     {}", line)));
            }
        }

        lines
    }
}

/// Writes reports to a terminal, optionally clearing it first.
pub struct ConsoleSink<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn show(&mut self, lines: &[String]) -> Result<()> {
        if self.clear_screen {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::TrendDirection;

    fn view(sent_history: Vec<i64>, recv_history: Vec<i64>) -> InterfaceView {
        InterfaceView {
            name: "eth0".to_string(),
            current_sent_rate: *sent_history.last().unwrap_or(&0),
            current_recv_rate: *recv_history.last().unwrap_or(&0),
            total_sent: 1536,
            total_recv: 1024 * 1024,
            sent_history,
            recv_history,
            sent_trend: TrendDirection::Increasing,
            recv_trend: TrendDirection::Stable,
        }
    }

    #[test]
    fn test_single_sample_has_no_graphs() {
        let report = ConsoleReport::new(60, 6, Duration::from_secs(1));
        let lines = report.interface_lines(&view(vec![0], vec![0]));
        assert!(lines.contains(&"     Sent: 0.00 B/s ↑".to_string()));
        assert!(lines.contains(&"     Total Sent: 1.50 KB".to_string()));
        assert!(lines.contains(&"     Total Recv: 1.00 MB".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Traffic")));
    }

    #[test]
    fn test_graphs_for_both_directions() {
        let report = ConsoleReport::new(10, 3, Duration::from_secs(1));
        let lines = report.interface_lines(&view(vec![0, 2048], vec![0, 0]));

        assert!(lines.contains(&"   Sent Traffic (last 2 seconds):".to_string()));
        assert!(lines.contains(&"   Received Traffic (last 2 seconds):".to_string()));
        assert!(lines.contains(&"     Max: 2.00 KB/s".to_string()));
        assert!(lines.contains(&"     No activity".to_string()));
        let frames = lines.iter().filter(|l| l.trim_start().starts_with('┌')).count();
        assert_eq!(frames, 2);
    }

    #[test]
    fn test_short_interval_reports_per_second() {
        let report = ConsoleReport::new(10, 3, Duration::from_millis(250));
        let lines = report.interface_lines(&view(vec![0, 2048], vec![0, 1024]));

        assert!(lines.contains(&"     Sent: 8.00 KB/s ↑".to_string()));
        assert!(lines.contains(&"     Recv: 4.00 KB/s →".to_string()));
        assert!(lines.contains(&"   Sent Traffic (last 0.5 seconds):".to_string()));
        assert!(lines.contains(&"     Max: 8.00 KB/s".to_string()));
        assert!(lines.contains(&"     Max: 4.00 KB/s".to_string()));
    }

    #[test]
    fn test_full_report_frame() {
        let report = ConsoleReport::new(10, 3, Duration::from_secs(1));
        let lines = report.lines(&[view(vec![1, 2], vec![3, 4])], 2);
        assert!(lines[1].starts_with("NetWatch - Network Monitor - "));
        assert_eq!(lines[2], "Monitoring 2 interface(s)");
        assert_eq!(lines[lines.len() - 2], "Press Ctrl+C to stop monitoring");
    }

    #[test]
    fn test_sink_without_clearing_writes_plain_lines() {
        let mut sink = ConsoleSink::new(Vec::new(), false);
        sink.show(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "a\nb\n");
    }
}
