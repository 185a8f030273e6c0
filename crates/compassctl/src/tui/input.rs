//! Input bars for the two text fields.

use super::state::{InputField, PlotState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_input_bars(f: &mut Frame, area: Rect, state: &PlotState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_field(
        f,
        halves[0],
        " Action (the deed) ",
        &state.action_input,
        state.focus == InputField::Action,
    );
    draw_field(
        f,
        halves[1],
        " Intent (the motive) ",
        &state.intent_input,
        state.focus == InputField::Intent,
    );
}

fn draw_field(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Rgb(100, 200, 100))
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Keep the tail visible once the text outgrows the box.
    let usable = area.width.saturating_sub(3) as usize;
    let shown: String = if value.chars().count() > usable {
        value
            .chars()
            .skip(value.chars().count() - usable)
            .collect()
    } else {
        value.to_string()
    };

    let text = if focused {
        format!("{}_", shown)
    } else {
        shown
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .style(Style::default().fg(Color::Rgb(220, 220, 220)));

    f.render_widget(paragraph, area);
}
