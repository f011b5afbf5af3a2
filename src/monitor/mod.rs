mod signals;

pub use signals::setup_signal_handlers;

use crate::engine::TelemetryEngine;
use crate::error::{Error, Result};
use crate::metrics::CounterSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Engine handle shared between the sampling loop and a display.
pub type SharedEngine = Arc<Mutex<TelemetryEngine>>;

pub fn shared(engine: TelemetryEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

pub fn lock(engine: &SharedEngine) -> Result<MutexGuard<'_, TelemetryEngine>> {
    engine.lock()
        .map_err(|_| Error::Engine("telemetry engine lock poisoned".to_string()))
}

/// Cooperative stop flag, checked between ticks only.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn inner(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }
}

pub struct Monitor<S: CounterSource> {
    source: S,
    engine: SharedEngine,
    monitored: Vec<String>,
    interval: Duration,
    stop: StopFlag,
}

impl<S: CounterSource> Monitor<S> {
    pub fn new(source: S, engine: SharedEngine, monitored: Vec<String>, interval: Duration, stop: StopFlag) -> Self {
        Self {
            source,
            engine,
            monitored,
            interval,
            stop,
        }
    }

    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    pub fn monitored(&self) -> &[String] {
        &self.monitored
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Pulls one snapshot and applies it under a single lock. A failed
    /// snapshot skips the tick and returns `Ok(false)`.
    pub fn tick(&mut self) -> Result<bool> {
        let snapshot = match self.source.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Counter snapshot unavailable, skipping tick: {}", e);
                return Ok(false);
            }
        };

        let mut engine = lock(&self.engine)?;
        engine.tick(&self.monitored, &snapshot);
        Ok(true)
    }

    /// Samples every interval until the stop flag is raised, calling
    /// `on_tick` with the engine after each applied tick.
    pub fn run<F>(&mut self, mut on_tick: F) -> Result<()>
    where
        F: FnMut(&TelemetryEngine, &[String]) -> Result<()>,
    {
        log::info!(
            "Starting monitoring loop for {} interface(s) (interval: {}ms)",
            self.monitored.len(),
            self.interval.as_millis()
        );

        loop {
            let loop_start = Instant::now();

            if self.stop.should_stop() {
                log::info!("Stop requested, leaving monitoring loop");
                break;
            }

            if self.tick()? {
                let engine = lock(&self.engine)?;
                on_tick(&engine, &self.monitored)?;
            }

            self.sleep_until_next_cycle(loop_start);
        }

        Ok(())
    }

    fn sleep_until_next_cycle(&self, loop_start: Instant) {
        let elapsed = loop_start.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
    }
}
