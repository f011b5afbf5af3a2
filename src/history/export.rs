use crate::engine::TelemetryEngine;
use crate::error::{Error, Result};
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes every tracked interface history to `path`, JSON when the extension
/// is `.json`, CSV otherwise.
pub fn export_history(engine: &TelemetryEngine, path: &Path) -> Result<()> {
    let is_json = path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        export_to_json(engine, path)
    } else {
        export_to_csv(engine, path)
    }
}

pub fn export_to_csv(engine: &TelemetryEngine, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "interface,timestamp,sent_rate,recv_rate")?;

    for (name, state) in engine.interfaces() {
        for i in 0..state.len() {
            let timestamp = state.sample_times.get(i).copied().unwrap_or(0);
            let sent = state.sent_history.get(i).copied().unwrap_or(0);
            let recv = state.recv_history.get(i).copied().unwrap_or(0);

            writeln!(file, "{},{},{},{}", name, timestamp, sent, recv)?;
        }
    }

    Ok(())
}

pub fn export_to_json(engine: &TelemetryEngine, path: &Path) -> Result<()> {
    let interfaces: Vec<_> = engine.interfaces().into_iter()
        .map(|(name, state)| {
            let samples: Vec<_> = (0..state.len())
                .map(|i| json!({
                    "timestamp": state.sample_times.get(i).copied().unwrap_or(0),
                    "sent_rate": state.sent_history.get(i).copied().unwrap_or(0),
                    "recv_rate": state.recv_history.get(i).copied().unwrap_or(0),
                }))
                .collect();

            json!({
                "interface": name,
                "total_sent": state.total_sent,
                "total_recv": state.total_recv,
                "samples": samples,
            })
        })
        .collect();

    let output = json!({
        "ticks": engine.tick_count(),
        "interfaces": interfaces,
    });

    let json_str = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Export(format!("Failed to serialize JSON: {}", e)))?;

    let mut file = File::create(path)?;
    file.write_all(json_str.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::sampler::InterfaceCounterSample;
    use crate::metrics::CounterSnapshot;

    fn engine() -> TelemetryEngine {
        let mut engine = TelemetryEngine::default();
        let monitored = vec!["eth0".to_string()];
        for (sent, recv) in [(100u64, 200u64), (150, 260)] {
            let mut snapshot = CounterSnapshot::new();
            snapshot.insert("eth0".to_string(), InterfaceCounterSample::new(sent, recv));
            engine.tick(&monitored, &snapshot);
        }
        engine
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        export_history(&engine(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "interface,timestamp,sent_rate,recv_rate");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("eth0,"));
        assert!(lines[1].ends_with(",0,0"));
        assert!(lines[2].ends_with(",50,60"));
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.JSON");
        export_history(&engine(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["ticks"], 2);
        let iface = &value["interfaces"][0];
        assert_eq!(iface["interface"], "eth0");
        assert_eq!(iface["total_recv"], 260);
        assert_eq!(iface["samples"].as_array().unwrap().len(), 2);
        assert_eq!(iface["samples"][1]["sent_rate"], 50);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("history.csv");
        assert!(export_history(&engine(), &path).is_err());
    }
}
