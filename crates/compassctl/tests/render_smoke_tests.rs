//! Render smoke tests over a test backend.

use compass_common::{Mode, Point, Verdict};
use compassctl::tui::render::draw_ui;
use compassctl::tui::state::PlotState;
use ratatui::{backend::TestBackend, Terminal};

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn plotted_state() -> PlotState {
    let mut state = PlotState::new("gemini-test".to_string());
    state.points.push(Point::from_verdict(
        "returned the wallet",
        "honesty",
        Mode::Duty,
        Verdict {
            x: 0.7,
            y: 0.8,
            x_range: Some((0.6, 0.8)),
            y_range: Some((0.7, 0.9)),
        },
    ));
    state.points.push(Point::from_verdict(
        "spread a rumor",
        "jealousy",
        Mode::Outcome,
        Verdict {
            x: -0.6,
            y: -0.5,
            x_range: None,
            y_range: None,
        },
    ));
    state
}

#[test]
fn draw_ui_renders_all_panels() {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    let state = plotted_state();

    terminal.draw(|f| draw_ui(f, &state)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Moral compass"));
    assert!(text.contains("Points (newest first)"));
    assert!(text.contains("Action (the deed)"));
    assert!(text.contains("Intent (the motive)"));
    assert!(text.contains("2 points"));
    assert!(text.contains("spread a rumor"));
}

#[test]
fn hover_shows_tooltip() {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut state = plotted_state();
    state.hovered = state.points.iter().next().map(|p| p.id);

    terminal.draw(|f| draw_ui(f, &state)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("motive: honesty"));
}

#[test]
fn help_overlay_renders_on_top() {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut state = plotted_state();
    state.show_help = true;

    terminal.draw(|f| draw_ui(f, &state)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Keyboard Shortcuts"));
    assert!(text.contains("toggle uncertainty ellipse"));
}

#[test]
fn narrow_terminal_still_renders() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    let state = plotted_state();

    terminal.draw(|f| draw_ui(f, &state)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Moral compass"));
    // Sidebar is dropped on narrow terminals.
    assert!(!text.contains("Points (newest first)"));
}
