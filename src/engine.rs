use serde::Serialize;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::history::{RollingHistory, DEFAULT_CAPACITY};
use crate::metrics::sampler::{self, CounterSnapshot, InterfaceCounterSample};
use crate::trends::{self, TrendDirection};

/// Everything tracked for one monitored interface.
#[derive(Debug, Clone)]
pub struct InterfaceState {
    pub last_sample: Option<InterfaceCounterSample>,
    pub sent_history: RollingHistory<i64>,
    pub recv_history: RollingHistory<i64>,
    pub sample_times: RollingHistory<u64>,
    pub total_sent: u64,
    pub total_recv: u64,
}

impl InterfaceState {
    pub fn new(capacity: usize) -> Self {
        Self {
            last_sample: None,
            sent_history: RollingHistory::new(capacity),
            recv_history: RollingHistory::new(capacity),
            sample_times: RollingHistory::new(capacity),
            total_sent: 0,
            total_recv: 0,
        }
    }

    fn record(&mut self, sample: InterfaceCounterSample, timestamp: u64) -> (i64, i64) {
        let (sent_rate, recv_rate) = sampler::compute(self.last_sample.as_ref(), &sample);

        self.sent_history.append(sent_rate);
        self.recv_history.append(recv_rate);
        self.sample_times.append(timestamp);

        self.total_sent = sample.bytes_sent;
        self.total_recv = sample.bytes_recv;
        self.last_sample = Some(sample);

        (sent_rate, recv_rate)
    }

    pub fn current_sent_rate(&self) -> i64 {
        self.sent_history.latest().unwrap_or(0)
    }

    pub fn current_recv_rate(&self) -> i64 {
        self.recv_history.latest().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sent_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent_history.is_empty()
    }
}

/// Read-only snapshot of one interface, safe to hand to a display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceView {
    pub name: String,
    pub current_sent_rate: i64,
    pub current_recv_rate: i64,
    pub total_sent: u64,
    pub total_recv: u64,
    pub sent_history: Vec<i64>,
    pub recv_history: Vec<i64>,
    pub sent_trend: TrendDirection,
    pub recv_trend: TrendDirection,
}

pub struct TelemetryEngine {
    interfaces: HashMap<String, InterfaceState>,
    capacity: usize,
    ticks: u64,
}

impl TelemetryEngine {
    pub fn new(capacity: usize) -> Self {
        Self {
            interfaces: HashMap::new(),
            capacity,
            ticks: 0,
        }
    }

    /// Applies one sampling cycle. Monitored interfaces missing from the
    /// snapshot keep their state untouched for this tick.
    pub fn tick(&mut self, monitored: &[String], snapshot: &CounterSnapshot) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        for name in monitored {
            let Some(sample) = snapshot.get(name) else {
                log::debug!("Interface {} missing from snapshot, skipping", name);
                continue;
            };

            let capacity = self.capacity;
            let state = self.interfaces
                .entry(name.clone())
                .or_insert_with(|| {
                    log::info!("Tracking interface {}", name);
                    InterfaceState::new(capacity)
                });

            let (sent, recv) = state.record(*sample, timestamp);
            log::trace!("{}: sent {} B, recv {} B this tick", name, sent, recv);
        }

        self.ticks += 1;
    }

    pub fn state(&self, name: &str) -> Option<&InterfaceState> {
        self.interfaces.get(name)
    }

    /// Views for monitored interfaces that have at least one sample, in
    /// `monitored` order.
    pub fn views(&self, monitored: &[String]) -> Vec<InterfaceView> {
        monitored.iter()
            .filter_map(|name| {
                let state = self.interfaces.get(name)?;
                if state.is_empty() {
                    return None;
                }
                Some(InterfaceView {
                    name: name.clone(),
                    current_sent_rate: state.current_sent_rate(),
                    current_recv_rate: state.current_recv_rate(),
                    total_sent: state.total_sent,
                    total_recv: state.total_recv,
                    sent_history: state.sent_history.as_sequence(),
                    recv_history: state.recv_history.as_sequence(),
                    sent_trend: trends::direction(&state.sent_history),
                    recv_trend: trends::direction(&state.recv_history),
                })
            })
            .collect()
    }

    /// All tracked interfaces, sorted by name.
    pub fn interfaces(&self) -> Vec<(&String, &InterfaceState)> {
        let mut all: Vec<_> = self.interfaces.iter().collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TelemetryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, u64, u64)]) -> CounterSnapshot {
        entries.iter()
            .map(|(name, sent, recv)| (name.to_string(), InterfaceCounterSample::new(*sent, *recv)))
            .collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_tick_end_to_end() {
        let mut engine = TelemetryEngine::default();
        let monitored = names(&["eth0"]);

        engine.tick(&monitored, &snapshot(&[("eth0", 1000, 2000)]));
        let state = engine.state("eth0").unwrap();
        assert_eq!((state.current_sent_rate(), state.current_recv_rate()), (0, 0));
        assert_eq!((state.total_sent, state.total_recv), (1000, 2000));

        engine.tick(&monitored, &snapshot(&[("eth0", 1500, 2400)]));
        let state = engine.state("eth0").unwrap();
        assert_eq!((state.current_sent_rate(), state.current_recv_rate()), (500, 400));
        assert_eq!((state.total_sent, state.total_recv), (1500, 2400));
        assert_eq!(state.sent_history.len(), 2);
        assert_eq!(state.recv_history.len(), 2);
        assert_eq!(engine.tick_count(), 2);
    }

    #[test]
    fn test_unmonitored_interfaces_are_ignored() {
        let mut engine = TelemetryEngine::default();
        engine.tick(&names(&["eth0"]), &snapshot(&[("eth0", 1, 1), ("wlan0", 5, 5)]));
        assert!(engine.state("wlan0").is_none());
        assert_eq!(engine.interface_count(), 1);
    }

    #[test]
    fn test_absent_interface_is_skipped_not_removed() {
        let mut engine = TelemetryEngine::default();
        let monitored = names(&["eth0", "wlan0"]);

        engine.tick(&monitored, &snapshot(&[("eth0", 100, 100), ("wlan0", 10, 10)]));
        engine.tick(&monitored, &snapshot(&[("eth0", 200, 300)]));

        let wlan = engine.state("wlan0").unwrap();
        assert_eq!(wlan.len(), 1);
        assert_eq!(wlan.total_sent, 10);
        assert_eq!(engine.state("eth0").unwrap().len(), 2);

        engine.tick(&monitored, &snapshot(&[("eth0", 200, 300), ("wlan0", 40, 70)]));
        let wlan = engine.state("wlan0").unwrap();
        assert_eq!(wlan.current_sent_rate(), 30);
        assert_eq!(wlan.current_recv_rate(), 60);
    }

    #[test]
    fn test_histories_stay_aligned_and_bounded() {
        let mut engine = TelemetryEngine::new(3);
        let monitored = names(&["eth0"]);
        for i in 0..10u64 {
            engine.tick(&monitored, &snapshot(&[("eth0", i * 10, i * 20)]));
        }
        let state = engine.state("eth0").unwrap();
        assert_eq!(state.sent_history.len(), 3);
        assert_eq!(state.recv_history.len(), 3);
        assert_eq!(state.sample_times.len(), 3);
        assert_eq!(state.sent_history.as_sequence(), vec![10, 10, 10]);
        assert_eq!(state.total_recv, 180);
    }

    #[test]
    fn test_counter_reset_records_negative_rate() {
        let mut engine = TelemetryEngine::default();
        let monitored = names(&["eth0"]);
        engine.tick(&monitored, &snapshot(&[("eth0", 5000, 5000)]));
        engine.tick(&monitored, &snapshot(&[("eth0", 100, 6000)]));
        let state = engine.state("eth0").unwrap();
        assert_eq!(state.current_sent_rate(), -4900);
        assert_eq!(state.total_sent, 100);
    }

    #[test]
    fn test_views_follow_monitored_order() {
        let mut engine = TelemetryEngine::default();
        let monitored = names(&["wlan0", "missing", "eth0"]);
        engine.tick(&monitored, &snapshot(&[("eth0", 1, 2), ("wlan0", 3, 4)]));
        engine.tick(&monitored, &snapshot(&[("eth0", 11, 2), ("wlan0", 3, 4)]));

        let views = engine.views(&monitored);
        let order: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(order, vec!["wlan0", "eth0"]);

        let eth = &views[1];
        assert_eq!(eth.current_sent_rate, 10);
        assert_eq!(eth.sent_history, vec![0, 10]);
        assert_eq!(eth.sent_trend, TrendDirection::Increasing);
        assert_eq!(eth.recv_trend, TrendDirection::Stable);
    }

    #[test]
    fn test_interfaces_sorted() {
        let mut engine = TelemetryEngine::default();
        let monitored = names(&["b", "a"]);
        engine.tick(&monitored, &snapshot(&[("a", 0, 0), ("b", 0, 0)]));
        let listed: Vec<&str> = engine.interfaces().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(listed, vec!["a", "b"]);
    }
}
