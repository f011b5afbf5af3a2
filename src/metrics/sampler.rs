use std::collections::HashMap;
use std::time::Instant;

/// Cumulative counters for one interface at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceCounterSample {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub timestamp: Instant,
}

impl InterfaceCounterSample {
    pub fn new(bytes_sent: u64, bytes_recv: u64) -> Self {
        Self {
            bytes_sent,
            bytes_recv,
            timestamp: Instant::now(),
        }
    }
}

/// Interface name to its counters, as returned by a counter source.
pub type CounterSnapshot = HashMap<String, InterfaceCounterSample>;

/// Bytes sent and received since `previous`, as `(sent, recv)`.
///
/// The first observation of an interface has no baseline and yields `(0, 0)`.
/// A counter that went backwards (interface reset, 32-bit wrap) produces a
/// negative delta which is returned unchanged.
pub fn compute(
    previous: Option<&InterfaceCounterSample>,
    current: &InterfaceCounterSample,
) -> (i64, i64) {
    match previous {
        None => (0, 0),
        Some(prev) => (
            delta(prev.bytes_sent, current.bytes_sent),
            delta(prev.bytes_recv, current.bytes_recv),
        ),
    }
}

fn delta(previous: u64, current: u64) -> i64 {
    current.wrapping_sub(previous) as i64
}
