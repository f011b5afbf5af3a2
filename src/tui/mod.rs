pub mod events;
pub mod theme;
pub mod ui;

use crate::engine::InterfaceView;
use crate::error::{Error, Result};
use crate::metrics::CounterSource;
use crate::monitor::{self, Monitor, SharedEngine, StopFlag};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::thread;
use std::time::Duration;

/// Display state. Reads the shared engine, never writes it.
pub struct Dashboard {
    engine: SharedEngine,
    monitored: Vec<String>,
    /// Sampling interval, used to show rates per second.
    pub interval: Duration,
    pub views: Vec<InterfaceView>,
    pub paused: bool,
    pub selected: usize,
    pub running: bool,
}

impl Dashboard {
    pub fn new(engine: SharedEngine, monitored: Vec<String>, interval: Duration) -> Self {
        Self {
            engine,
            monitored,
            interval,
            views: Vec::new(),
            paused: false,
            selected: 0,
            running: true,
        }
    }

    /// Copies the current views out of the engine unless paused.
    pub fn refresh(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        let engine = monitor::lock(&self.engine)?;
        self.views = engine.views(&self.monitored);
        if self.selected >= self.views.len() {
            self.selected = self.views.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn monitored_count(&self) -> usize {
        self.monitored.len()
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn move_selection_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected + 1 < self.views.len() {
            self.selected += 1;
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

/// Runs the dashboard in the foreground while `monitor` samples on a
/// background thread.
pub fn run<S>(mut monitor: Monitor<S>, stop: StopFlag, redraw: Duration) -> Result<()>
where
    S: CounterSource + Send + 'static,
{
    let mut dashboard = Dashboard::new(monitor.engine(), monitor.monitored().to_vec(), monitor.interval());

    let sampler = thread::Builder::new()
        .name("netwatch-sampler".to_string())
        .spawn(move || monitor.run(|_, _| Ok(())))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = events::EventHandler::new(redraw);
    let result = run_app(&mut terminal, &mut dashboard, &event_handler, &stop);

    stop.stop();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let sampled = sampler.join()
        .map_err(|_| Error::Tui("sampling thread panicked".to_string()))?;

    result.and(sampled)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard,
    event_handler: &events::EventHandler,
    stop: &StopFlag,
) -> Result<()> {
    dashboard.refresh()?;

    loop {
        terminal.draw(|f| ui::draw(f, dashboard))?;

        match event_handler.next()? {
            events::AppEvent::Key(key) => {
                if events::should_quit(&key) {
                    dashboard.quit();
                } else if events::should_pause(&key) {
                    dashboard.toggle_pause();
                } else if events::is_arrow_up(&key) {
                    dashboard.move_selection_up();
                } else if events::is_arrow_down(&key) {
                    dashboard.move_selection_down();
                }
            }
            events::AppEvent::Tick => {
                dashboard.refresh()?;
            }
            events::AppEvent::Resize(_, _) => {}
        }

        if !dashboard.running || stop.should_stop() {
            break;
        }
    }

    Ok(())
}
