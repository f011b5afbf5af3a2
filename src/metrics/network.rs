use sysinfo::Networks;

use super::sampler::{CounterSnapshot, InterfaceCounterSample};
use crate::error::Result;

/// Anything that can report cumulative per-interface byte counters.
pub trait CounterSource {
    /// Interface names currently known to the source, sorted.
    fn interfaces(&mut self) -> Result<Vec<String>>;

    fn snapshot(&mut self) -> Result<CounterSnapshot>;
}

/// Counter source backed by the OS network statistics.
pub struct NetworkMetrics {
    networks: Networks,
}

impl NetworkMetrics {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// Re-reads counters and the interface list together. A plain
    /// `Networks::refresh` keeps vanished interfaces around with zeroed
    /// counters, which would read as a huge negative rate.
    pub fn refresh(&mut self) {
        self.networks.refresh_list();
    }
}

/// Builds a snapshot from `(name, bytes_sent, bytes_recv)` triples.
pub fn snapshot_from_counters<I, S>(counters: I) -> CounterSnapshot
where
    I: IntoIterator<Item = (S, u64, u64)>,
    S: Into<String>,
{
    counters.into_iter()
        .map(|(name, sent, recv)| (name.into(), InterfaceCounterSample::new(sent, recv)))
        .collect()
}

impl Default for NetworkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for NetworkMetrics {
    fn interfaces(&mut self) -> Result<Vec<String>> {
        self.refresh();
        let mut names: Vec<String> = self.networks.iter()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn snapshot(&mut self) -> Result<CounterSnapshot> {
        self.refresh();
        Ok(snapshot_from_counters(self.networks.iter()
            .map(|(name, network)| (name.as_str(), network.total_transmitted(), network.total_received()))))
    }
}

/// Scripted counter source, one snapshot per call. Repeats the last snapshot
/// once the script is exhausted.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedSource {
    snapshots: Vec<Vec<(String, u64, u64)>>,
    position: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(snapshots: Vec<Vec<(String, u64, u64)>>) -> Self {
        Self { snapshots, position: 0 }
    }
}

#[cfg(test)]
impl CounterSource for ScriptedSource {
    fn interfaces(&mut self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.snapshots.iter()
            .flatten()
            .map(|(name, _, _)| name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn snapshot(&mut self) -> Result<CounterSnapshot> {
        if self.snapshots.is_empty() {
            return Err(crate::error::Error::Source("no scripted snapshots".to_string()));
        }
        let index = self.position.min(self.snapshots.len() - 1);
        self.position += 1;
        Ok(snapshot_from_counters(self.snapshots[index].iter()
            .map(|(name, sent, recv)| (name.as_str(), *sent, *recv))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> ScriptedSource {
        ScriptedSource::new(vec![
            vec![("eth0".to_string(), 10, 20), ("lo".to_string(), 1, 1)],
            vec![("eth0".to_string(), 30, 50)],
        ])
    }

    #[test]
    fn test_scripted_interfaces_sorted_and_unique() {
        let mut source = script();
        assert_eq!(source.interfaces().unwrap(), vec!["eth0".to_string(), "lo".to_string()]);
    }

    #[test]
    fn test_scripted_snapshots_advance_then_repeat() {
        let mut source = script();
        let first = source.snapshot().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first["eth0"].bytes_sent, 10);

        let second = source.snapshot().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second["eth0"].bytes_recv, 50);

        let third = source.snapshot().unwrap();
        assert_eq!(third["eth0"].bytes_sent, 30);
    }

    #[test]
    fn test_empty_script_is_an_error() {
        let mut source = ScriptedSource::default();
        assert!(source.snapshot().is_err());
    }

    #[test]
    fn test_snapshot_from_counters() {
        let snapshot = snapshot_from_counters(vec![("eth0", 5, 7), ("wlan0", 1, 2)]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["eth0"].bytes_sent, 5);
        assert_eq!(snapshot["eth0"].bytes_recv, 7);
    }

    #[test]
    fn test_vanished_interface_is_skipped_not_zeroed() {
        use crate::engine::TelemetryEngine;

        let monitored = vec!["eth0".to_string(), "tun0".to_string()];
        let mut engine = TelemetryEngine::default();
        engine.tick(&monitored, &snapshot_from_counters(vec![("eth0", 100, 100), ("tun0", 5_000_000_000, 7_000_000_000)]));
        engine.tick(&monitored, &snapshot_from_counters(vec![("eth0", 200, 150)]));

        let tun = engine.state("tun0").unwrap();
        assert_eq!(tun.len(), 1);
        assert_eq!(tun.current_sent_rate(), 0);
        assert_eq!((tun.total_sent, tun.total_recv), (5_000_000_000, 7_000_000_000));
        assert_eq!(engine.state("eth0").unwrap().current_sent_rate(), 100);
    }

    #[test]
    fn test_os_snapshot_matches_listed_interfaces() {
        let mut source = NetworkMetrics::new();
        let snapshot = source.snapshot().unwrap();
        let names = source.interfaces().unwrap();
        for name in snapshot.keys() {
            assert!(names.contains(name));
        }
    }

    #[test]
    fn test_os_source_lists_sorted_names() {
        let mut source = NetworkMetrics::new();
        let names = source.interfaces().unwrap();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
