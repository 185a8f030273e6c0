//! Event loop: terminal lifecycle, key and mouse handling, completion
//! messages from the in-flight judgment task.

use super::layout;
use super::render::{draw_ui, hit_test};
use super::state::PlotState;
use crate::analysis::{AnalysisClient, GeminiSource};
use crate::snapshot;
use anyhow::Result;
use compass_common::{CompassConfig, Point};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

/// Completion messages from the judgment task.
#[derive(Debug)]
pub enum TuiMessage {
    Judged { point: Point, cache_entries: usize },
    JudgeFailed(String),
}

type Client = Arc<Mutex<AnalysisClient<GeminiSource>>>;

/// Run the TUI until the user quits.
pub async fn run() -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let config = CompassConfig::load_or_default();
    if CompassConfig::api_key().is_none() {
        warn!("no API key in the environment; every submission will fail");
    }

    let mut state = PlotState::new(config.model.model.clone());
    let client: Client = Arc::new(Mutex::new(AnalysisClient::from_config(&config)));
    let (tx, mut rx) = mpsc::channel(32);

    let result = run_event_loop(&mut terminal, &mut state, &client, tx, &mut rx).await;

    let cleanup = restore_terminal(&mut terminal);
    result.and(cleanup)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut PlotState,
    client: &Client,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    loop {
        if state.busy {
            state.thinking_frame = (state.thinking_frame + 1) % 8;
        }

        while let Ok(message) = rx.try_recv() {
            match message {
                TuiMessage::Judged {
                    point,
                    cache_entries,
                } => {
                    state.busy = false;
                    state.cache_entries = cache_entries;
                    state.set_status(format!("Plotted '{}'", point.label));
                    state.points.push(point);
                    state.selected = 0;
                }
                TuiMessage::JudgeFailed(message) => {
                    state.busy = false;
                    state.set_status(message);
                }
            }
        }

        terminal.draw(|f| draw_ui(f, state))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Mouse(mouse) => {
                if let MouseEventKind::Moved = mouse.kind {
                    let grid = layout::compute_layout(terminal.size()?);
                    let hovered = hit_test(state, grid.chart, mouse.column, mouse.row);
                    state.hovered = hovered;
                }
            }
            Event::Key(key) => match (key.code, key.modifiers) {
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,

                (KeyCode::F(1), _) => state.show_help = !state.show_help,
                (KeyCode::Esc, _) => {
                    state.show_help = false;
                    state.hovered = None;
                }

                (KeyCode::F(2), _) => {
                    state.mode = state.mode.toggled();
                    state.set_status(format!("Mode: {}", state.mode));
                }

                (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                    state.focus = state.focus.next();
                }

                (KeyCode::Enter, _) => {
                    if state.can_submit() {
                        submit(state, client, tx.clone());
                    } else if state.busy {
                        state.set_status("A judgment is already in flight");
                    } else {
                        state.set_status("Describe the action first");
                    }
                }

                (KeyCode::Backspace, _) => {
                    state.focused_input_mut().pop();
                }
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                    state.focused_input_mut().clear();
                }

                (KeyCode::Up, _) => state.select_previous(),
                (KeyCode::Down, _) => state.select_next(),

                (KeyCode::Delete, _) => {
                    if let Some(id) = state.selected_point_id() {
                        if let Some(point) = state.points.remove(id) {
                            state.set_status(format!("Removed '{}'", point.label));
                        }
                        if state.hovered == Some(id) {
                            state.hovered = None;
                        }
                        state.clamp_selection();
                    }
                }

                (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                    if let Some(id) = state.selected_point_id() {
                        match state.points.toggle_uncertainty(id) {
                            Some(true) => state.set_status("Uncertainty shown"),
                            Some(false) => state.set_status("Uncertainty hidden"),
                            None => {}
                        }
                    }
                }

                (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                    state.points.clear();
                    state.selected = 0;
                    state.hovered = None;
                    state.set_status("All points cleared");
                }

                (KeyCode::Char('x'), KeyModifiers::CONTROL) => match client.try_lock() {
                    Ok(mut client) => {
                        client.clear_cache();
                        state.cache_entries = 0;
                        state.set_status("Judgment cache cleared");
                    }
                    Err(_) => state.set_status("Busy - wait for the current judgment"),
                },

                (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                    let path = snapshot::default_snapshot_path();
                    match snapshot::write_snapshot(&path, &state.points) {
                        Ok(()) => state.set_status(format!("Saved {}", path.display())),
                        Err(e) => {
                            warn!("snapshot failed: {:#}", e);
                            state.set_status("Could not save snapshot");
                        }
                    }
                }

                (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                    state.focused_input_mut().push(c);
                }

                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}

/// Kick off the single in-flight judgment. The busy flag stays set until
/// the completion message arrives; there is no cancellation path.
fn submit(state: &mut PlotState, client: &Client, tx: mpsc::Sender<TuiMessage>) {
    let action = state.action_input.trim().to_string();
    let intent = state.intent_input.trim().to_string();
    let mode = state.mode;

    state.busy = true;
    state.thinking_frame = 0;
    state.set_status("Consulting the model...");
    info!("submitting '{}' under mode {}", action, mode);

    let client = Arc::clone(client);
    tokio::spawn(async move {
        let mut client = client.lock().await;
        let message = match client.analyze(&action, &intent, mode).await {
            Ok(verdict) => TuiMessage::Judged {
                point: Point::from_verdict(&action, &intent, mode, verdict),
                cache_entries: client.cache_len(),
            },
            Err(e) => {
                warn!("submission failed: {}", e);
                TuiMessage::JudgeFailed(e.user_message().to_string())
            }
        };
        let _ = tx.send(message).await;
    });
}
