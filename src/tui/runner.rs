//! Demo runner - wires a terminal, the bus, and instrumented fetches
//!
//! The runner is the composition root of the demo: it constructs the bus,
//! spawns the sweep provider, kicks off a batch of loading operations, and
//! redraws the screen from bus notifications. With `--url` the operations
//! are real instrumented fetches; without it they are simulated with
//! random delays.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bus::{LoadingBus, LoadingState, Subscription};
use crate::config::Config;
use crate::fetch::InstrumentedClient;
use crate::provider::{LoadingProvider, ProviderRequest};

use super::events::{Event, EventHandler};
use super::{Tui, overlay};

/// Demo event loop state
pub struct DemoRunner {
    terminal: Tui,
    bus: LoadingBus,
    subscription: Subscription,
    events: EventHandler,
    state: LoadingState,
    results: Vec<String>,
    result_rx: mpsc::UnboundedReceiver<String>,
    total: usize,
    tick: usize,
    should_quit: bool,
}

impl DemoRunner {
    fn new(
        terminal: Tui,
        bus: LoadingBus,
        result_rx: mpsc::UnboundedReceiver<String>,
        total: usize,
        tick_rate: Duration,
    ) -> Self {
        let subscription = bus.subscribe();
        Self {
            terminal,
            bus,
            subscription,
            events: EventHandler::new(tick_rate),
            state: LoadingState::idle(),
            results: Vec::new(),
            result_rx,
            total,
            tick: 0,
            should_quit: false,
        }
    }

    async fn run(&mut self) -> Result<()> {
        loop {
            // Latest bus state wins; intermediate deliveries are redundant
            if let Some(state) = self.subscription.latest() {
                self.state = state;
            }
            while let Ok(line) = self.result_rx.try_recv() {
                self.results.push(line);
            }

            let state = self.state;
            let tick = self.tick;
            let results = self.results.clone();
            let total = self.total;
            self.terminal
                .draw(|frame| render(frame, state, &results, total, tick))?;

            match self.events.next().await? {
                Event::Tick => {
                    self.tick += 1;
                }
                Event::Key(key) => {
                    if self.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    debug!("Terminal resized");
                }
            }

            // Exit once every operation reported and the overlay has cleared
            if self.results.len() >= self.total && !self.bus.is_visible() {
                debug!("All operations done and overlay cleared, exiting");
                break;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            _ => false,
        }
    }
}

/// Render one frame: header, results list, footer, overlay on top
fn render(frame: &mut Frame, state: LoadingState, results: &[String], total: usize, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("loadbus demo", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  in-flight: {}  done: {}/{}", state.active, results.len(), total)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = results.iter().map(|line| ListItem::new(line.as_str())).collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(list, chunks[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" q", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" quit "),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);

    if state.visible() {
        overlay::render_overlay(frame, frame.area(), tick);
    }
}

/// Run the interactive demo
pub async fn run_demo(config: &Config, url: Option<String>, count: usize) -> Result<()> {
    let bus = LoadingBus::new();

    let provider = LoadingProvider::new(bus.clone(), config.sweep.clone());
    let provider_tx = provider.sender();
    let provider_task = tokio::spawn(provider.run());

    let (result_tx, result_rx) = mpsc::unbounded_channel();
    spawn_operations(config, &bus, url, count, result_tx)?;

    let terminal = super::init()?;

    // Restore the terminal even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = super::restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = DemoRunner::new(terminal, bus, result_rx, count, config.tui.tick());
    let result = runner.run().await;

    let _ = provider_tx.send(ProviderRequest::Shutdown).await;
    let _ = tokio::time::timeout(Duration::from_secs(1), provider_task).await;

    result
}

/// Spawn the demo's loading operations
///
/// Each operation holds a bus guard for its duration and reports a result
/// line when it finishes.
fn spawn_operations(
    config: &Config,
    bus: &LoadingBus,
    url: Option<String>,
    count: usize,
    result_tx: mpsc::UnboundedSender<String>,
) -> Result<()> {
    match url {
        Some(url) => {
            let client = Arc::new(InstrumentedClient::from_config(&config.fetch, bus.clone())?);
            for i in 0..count {
                let client = Arc::clone(&client);
                let url = url.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    let line = match client.get_json(&url).await {
                        Ok(_) => format!("fetch {}: ok", i + 1),
                        Err(e) => {
                            warn!(fetch = i + 1, error = %e, "demo fetch failed");
                            format!("fetch {}: {}", i + 1, e)
                        }
                    };
                    let _ = tx.send(line);
                });
            }
        }
        None => {
            let min_visible = config.tui.min_visible();
            for i in 0..count {
                let bus = bus.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    let delay = {
                        let _guard = bus.guard(min_visible);
                        let delay = rand::rng().random_range(200..=1200);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay
                    };
                    // Guard released; the bus already saw the end signal
                    let _ = tx.send(format!("op {}: done in {}ms", i + 1, delay));
                });
            }
        }
    }

    Ok(())
}
