//! Rendering: header, scatter chart, sidebar, status bar, overlays.
//!
//! Pure functions of the state; the only render-adjacent state is the
//! transient hover id that gates the tooltip.

use super::input::draw_input_bars;
use super::layout::{compute_layout, PlotLayout};
use super::state::PlotState;
use compass_common::{Mode, Point};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        canvas::{Canvas, Line as CanvasLine, Painter, Points, Shape},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};
use uuid::Uuid;

/// Data bounds with margin so edge points and labels stay visible.
const X_BOUNDS: [f64; 2] = [-1.2, 1.2];
const Y_BOUNDS: [f64; 2] = [-1.2, 1.2];

/// Smallest ellipse radius, so a one-axis range still reads as a region.
const MIN_RADIUS: f64 = 0.02;

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn draw_ui(f: &mut Frame, state: &PlotState) {
    let grid = compute_layout(f.size());

    draw_header(f, grid.header, state);
    draw_chart(f, grid.chart, state);
    if grid.sidebar.width > 0 {
        draw_sidebar(f, grid.sidebar, state);
    }
    draw_input_bars(f, grid.inputs, state);
    draw_status_bar(f, grid.status, state);

    if let Some(id) = state.hovered {
        draw_tooltip(f, grid.chart, state, id);
    }
    if state.show_help {
        draw_help_overlay(f, f.size());
    }
}

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Duty => Color::Cyan,
        Mode::Outcome => Color::Magenta,
    }
}

fn ellipse_color(mode: Mode) -> Color {
    match mode {
        Mode::Duty => Color::Rgb(0, 120, 120),
        Mode::Outcome => Color::Rgb(120, 0, 120),
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &PlotState) {
    let header = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("compass v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(150, 200, 255)),
        ),
        Span::styled(
            format!(" | {} | mode: ", state.model_label),
            Style::default().fg(Color::Rgb(150, 200, 255)),
        ),
        Span::styled(
            state.mode.to_string(),
            Style::default()
                .fg(mode_color(state.mode))
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_chart(f: &mut Frame, area: Rect, state: &PlotState) {
    let duty_coords: Vec<(f64, f64)> = state
        .points
        .iter()
        .filter(|p| p.mode == Mode::Duty)
        .map(|p| (p.x, p.y))
        .collect();
    let outcome_coords: Vec<(f64, f64)> = state
        .points
        .iter()
        .filter(|p| p.mode == Mode::Outcome)
        .map(|p| (p.x, p.y))
        .collect();
    let hovered = state.hovered.and_then(|id| state.points.get(id));

    let legend = Title::from(Line::from(vec![
        Span::styled(" ● duty ", Style::default().fg(mode_color(Mode::Duty))),
        Span::styled("● outcome ", Style::default().fg(mode_color(Mode::Outcome))),
    ]))
    .position(Position::Bottom);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Moral compass ")
                .title(legend),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds(X_BOUNDS)
        .y_bounds(Y_BOUNDS)
        .paint(|ctx| {
            // Axes
            ctx.draw(&CanvasLine {
                x1: -1.0,
                y1: 0.0,
                x2: 1.0,
                y2: 0.0,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -1.0,
                x2: 0.0,
                y2: 1.0,
                color: Color::DarkGray,
            });

            // Uncertainty regions under the marks
            for point in state.points.iter() {
                if let Some(ellipse) = ellipse_for(point, ellipse_color(point.mode)) {
                    ctx.draw(&ellipse);
                }
            }

            if !duty_coords.is_empty() {
                ctx.draw(&Points {
                    coords: &duty_coords,
                    color: mode_color(Mode::Duty),
                });
            }
            if !outcome_coords.is_empty() {
                ctx.draw(&Points {
                    coords: &outcome_coords,
                    color: mode_color(Mode::Outcome),
                });
            }

            if let Some(point) = hovered {
                ctx.draw(&Ellipse {
                    x: point.x,
                    y: point.y,
                    rx: 0.05,
                    ry: 0.05,
                    color: Color::Yellow,
                });
            }

            let quadrant = Style::default().fg(Color::DarkGray);
            ctx.print(0.55, 1.1, Line::styled("righteous", quadrant));
            ctx.print(-1.1, 1.1, Line::styled("calculated", quadrant));
            ctx.print(0.55, -1.1, Line::styled("misguided", quadrant));
            ctx.print(-1.1, -1.1, Line::styled("wicked", quadrant));
            ctx.print(1.0, 0.08, Line::styled("intent", quadrant));
            ctx.print(0.05, 1.0, Line::styled("action", quadrant));
        });

    f.render_widget(canvas, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, state: &PlotState) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, point) in state.points.recent().enumerate() {
        let mut style = Style::default();
        if index == state.selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if point.show_uncertainty && point.has_uncertainty() {
            "◍ "
        } else {
            "● "
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(mode_color(point.mode))),
            Span::styled(
                format!("{} ({:+.2}, {:+.2})", point.label, point.x, point.y),
                style,
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::styled(
            "No points yet",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Points (newest first) "),
    );
    f.render_widget(sidebar, area);
}

fn draw_status_bar(f: &mut Frame, area: Rect, state: &PlotState) {
    let activity = if state.busy {
        format!("{} judging", SPINNER_FRAMES[state.thinking_frame % SPINNER_FRAMES.len()])
    } else {
        "ready".to_string()
    };

    let text = format!(
        " {} | {} points | {} cached | {} | F1 help",
        activity,
        state.points.len(),
        state.cache_entries,
        state.status,
    );

    let status = Paragraph::new(Line::styled(
        text,
        Style::default().fg(Color::Rgb(180, 180, 180)),
    ));
    f.render_widget(status, area);
}

fn draw_tooltip(f: &mut Frame, chart: Rect, state: &PlotState, id: Uuid) {
    let Some(point) = state.points.get(id) else {
        return;
    };
    if chart.width < 20 || chart.height < 8 {
        return;
    }

    let width = chart.width.saturating_sub(4).min(38);
    let wrap_width = width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = vec![Line::styled(
        point.label.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for part in textwrap::wrap(&format!("act: {}", point.action), wrap_width) {
        lines.push(Line::raw(part.into_owned()));
    }
    for part in textwrap::wrap(&format!("motive: {}", point.intent), wrap_width) {
        lines.push(Line::raw(part.into_owned()));
    }
    lines.push(Line::raw(format!(
        "intent {:+.2}  action {:+.2}",
        point.x, point.y
    )));
    if let Some((lo, hi)) = point.x_range {
        lines.push(Line::raw(format!("intent range {:+.2} .. {:+.2}", lo, hi)));
    }
    if let Some((lo, hi)) = point.y_range {
        lines.push(Line::raw(format!("action range {:+.2} .. {:+.2}", lo, hi)));
    }
    lines.push(Line::styled(
        format!("mode: {}", point.mode),
        Style::default().fg(mode_color(point.mode)),
    ));

    let height = (lines.len() as u16 + 2).min(chart.height.saturating_sub(2));
    let tooltip_area = Rect::new(
        chart.x + chart.width - width - 1,
        chart.y + 1,
        width,
        height,
    );

    f.render_widget(Clear, tooltip_area);
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" point ")),
        tooltip_area,
    );
}

fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {}", what)),
        ])
    };

    let lines = vec![
        Line::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        key("Enter", "judge and plot"),
        key("Tab", "switch input field"),
        key("F2", "switch judging mode"),
        key("Up/Down", "select a point"),
        key("Delete", "remove selected point"),
        key("Ctrl+E", "toggle uncertainty ellipse"),
        key("Ctrl+L", "clear all points"),
        key("Ctrl+X", "clear the judgment cache"),
        key("Ctrl+S", "save points to JSON"),
        key("Ctrl+U", "clear focused field"),
        key("F1/Esc", "close help"),
        key("Ctrl+C", "quit"),
    ];

    let overlay = centered_rect(area, 44, lines.len() as u16 + 2);
    f.render_widget(Clear, overlay);
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        overlay,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Axis-aligned ellipse painted the way ratatui paints its circle shape.
struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    color: Color,
}

impl Shape for Ellipse {
    fn draw(&self, painter: &mut Painter) {
        for angle in 0..360 {
            let radians = f64::from(angle).to_radians();
            let px = self.x + self.rx * radians.cos();
            let py = self.y + self.ry * radians.sin();
            if let Some((x, y)) = painter.get_point(px, py) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Uncertainty region for one point, or None when nothing should be drawn.
fn ellipse_for(point: &Point, color: Color) -> Option<Ellipse> {
    if !point.show_uncertainty || !point.has_uncertainty() {
        return None;
    }
    let (cx, rx) = axis_span(point.x, point.x_range);
    let (cy, ry) = axis_span(point.y, point.y_range);
    Some(Ellipse {
        x: cx,
        y: cy,
        rx,
        ry,
        color,
    })
}

/// Center and radius of the region along one axis.
fn axis_span(value: f64, range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) => ((lo + hi) / 2.0, ((hi - lo) / 2.0).max(MIN_RADIUS)),
        None => (value, MIN_RADIUS),
    }
}

/// The chart drawing area inside the block borders.
fn inner_rect(area: Rect) -> Option<Rect> {
    if area.width <= 2 || area.height <= 2 {
        return None;
    }
    Some(Rect::new(
        area.x + 1,
        area.y + 1,
        area.width - 2,
        area.height - 2,
    ))
}

/// Data coordinates at the center of a terminal cell.
fn cell_to_data(inner: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let fx = ((column - inner.x) as f64 + 0.5) / inner.width as f64;
    let fy = ((row - inner.y) as f64 + 0.5) / inner.height as f64;
    let x = X_BOUNDS[0] + fx * (X_BOUNDS[1] - X_BOUNDS[0]);
    let y = Y_BOUNDS[1] - fy * (Y_BOUNDS[1] - Y_BOUNDS[0]);
    Some((x, y))
}

/// Point under the pointer, within ~1.5 cells, nearest wins.
pub fn hit_test(state: &PlotState, chart: Rect, column: u16, row: u16) -> Option<Uuid> {
    let inner = inner_rect(chart)?;
    let (x, y) = cell_to_data(inner, column, row)?;

    let tol_x = (X_BOUNDS[1] - X_BOUNDS[0]) / inner.width as f64 * 1.5;
    let tol_y = (Y_BOUNDS[1] - Y_BOUNDS[0]) / inner.height as f64 * 1.5;

    let distance = |p: &Point| {
        let dx = (p.x - x) / tol_x;
        let dy = (p.y - y) / tol_y;
        dx * dx + dy * dy
    };

    state
        .points
        .iter()
        .filter(|p| distance(p) <= 1.0)
        .min_by(|a, b| {
            distance(a)
                .partial_cmp(&distance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.id)
}
