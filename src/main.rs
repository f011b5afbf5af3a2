use clap::Parser;
use netwatch::metrics::{CounterSource, NetworkMetrics};
use netwatch::monitor::{self, Monitor, StopFlag};
use netwatch::render::{ConsoleReport, ConsoleSink};
use netwatch::{select, Config, Result, TelemetryEngine};
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "netwatch")]
#[command(author, version, about = "Per-interface network throughput monitor", long_about = None)]
struct Args {
    #[arg(short, long, help = "Refresh interval in milliseconds")]
    refresh_rate: Option<u64>,

    #[arg(short, long, help = "Path to custom config file")]
    config: Option<PathBuf>,

    #[arg(short, long, value_delimiter = ',', help = "Interfaces to monitor (comma-separated), skips the prompt")]
    interfaces: Vec<String>,

    #[arg(short, long, help = "Monitor all interfaces, skips the prompt")]
    all: bool,

    #[arg(long, help = "List available interfaces and exit")]
    list: bool,

    #[arg(long, help = "Graphical dashboard instead of text output", conflicts_with = "headless")]
    tui: bool,

    #[arg(long, help = "Headless mode (one JSON document per tick)")]
    headless: bool,

    #[arg(long, help = "Graph width in samples")]
    width: Option<usize>,

    #[arg(long, help = "Graph height in rows")]
    height: Option<usize>,

    #[arg(long, help = "Export history to file on exit (csv or json)", value_name = "FILE")]
    export_history: Option<PathBuf>,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    log::info!("Starting NetWatch v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(config_path) = &args.config {
        log::info!("Loading config from: {}", config_path.display());
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_else(|e| {
            log::warn!("Using default config: {}", e);
            Config::default()
        })
    };

    if let Some(refresh_rate) = args.refresh_rate {
        config.refresh.interval_ms = refresh_rate.max(1);
    }
    if let Some(width) = args.width {
        config.display.graph_width = width;
    }
    if let Some(height) = args.height {
        config.display.graph_height = height;
    }

    let mut source = NetworkMetrics::new();
    let available = source.interfaces()?;
    log::debug!("Available interfaces: {:?}", available);

    if args.list {
        for (i, name) in available.iter().enumerate() {
            println!("{}. {}", i + 1, name);
        }
        return Ok(());
    }

    let monitored = choose_interfaces(&args, &available)?;
    log::info!("Monitoring {} interface(s): {}", monitored.len(), monitored.join(", "));

    let engine = monitor::shared(TelemetryEngine::new(config.refresh.history_samples));
    let stop = StopFlag::new();
    let interval = Duration::from_millis(config.refresh.interval_ms);
    let mut sampler = Monitor::new(source, Arc::clone(&engine), monitored, interval, stop.clone());

    if args.tui {
        netwatch::tui::run(sampler, stop, interval)?;
    } else {
        monitor::setup_signal_handlers(&stop)?;
        if args.headless {
            run_headless(&mut sampler)?;
        } else {
            run_console(&mut sampler, &config)?;
            println!("\n\nNetwork monitoring stopped by user.");
        }
    }

    if let Some(path) = &args.export_history {
        export(&engine, path)?;
    }

    Ok(())
}

fn choose_interfaces(args: &Args, available: &[String]) -> Result<Vec<String>> {
    if args.all || (args.headless && args.interfaces.is_empty()) {
        return Ok(available.to_vec());
    }
    if !args.interfaces.is_empty() {
        return select::resolve_names(&args.interfaces, available);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    select::prompt(available, &mut input, &mut output)
}

fn run_console(sampler: &mut Monitor<NetworkMetrics>, config: &Config) -> Result<()> {
    log::info!("Starting console mode");
    println!("\nMonitoring started for {} interface(s)", sampler.monitored().len());
    println!("Updates every {}ms - Press Ctrl+C to stop", config.refresh.interval_ms);

    let report = ConsoleReport::new(
        config.display.graph_width,
        config.display.graph_height,
        sampler.interval(),
    );
    let mut sink = ConsoleSink::new(io::stdout(), config.display.clear_screen);

    sampler.run(|engine, monitored| {
        let views = engine.views(monitored);
        sink.show(&report.lines(&views, monitored.len()))
    })
}

fn run_headless(sampler: &mut Monitor<NetworkMetrics>) -> Result<()> {
    log::info!("Running in headless mode");
    let interval_ms = sampler.interval().as_millis() as u64;

    sampler.run(|engine, monitored| {
        let output = json!({
            "timestamp": chrono::Local::now().to_rfc3339(),
            "tick": engine.tick_count(),
            "interval_ms": interval_ms,
            "interfaces": engine.views(monitored),
        });
        println!("{}", output);
        Ok(())
    })
}

fn export(engine: &monitor::SharedEngine, path: &Path) -> Result<()> {
    let engine = monitor::lock(engine)?;
    netwatch::history::export_history(&engine, path)?;
    log::info!("History exported to {}", path.display());
    Ok(())
}
