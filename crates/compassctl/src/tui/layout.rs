//! Canonical layout grid for the plot TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// All panel rectangles for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotLayout {
    /// Header bar (top, 1 line).
    pub header: Rect,
    /// Scatter chart.
    pub chart: Rect,
    /// Point summary sidebar (zero width on narrow terminals).
    pub sidebar: Rect,
    /// Action/intent input bars.
    pub inputs: Rect,
    /// Status bar (bottom, 1 line).
    pub status: Rect,
}

const HEADER_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Sidebar appears only when the terminal is wide enough to keep the
/// chart square-ish.
const MIN_WIDTH_FOR_SIDEBAR: u16 = 72;

pub fn compute_layout(frame_area: Rect) -> PlotLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame_area);

    let (chart, sidebar) = if frame_area.width >= MIN_WIDTH_FOR_SIDEBAR {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(rows[1]);
        (body[0], body[1])
    } else {
        (rows[1], Rect::new(rows[1].x, rows[1].y, 0, 0))
    };

    PlotLayout {
        header: rows[0],
        chart,
        sidebar,
        inputs: rows[2],
        status: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_has_sidebar() {
        let layout = compute_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.inputs.height, 3);
        assert!(layout.sidebar.width > 0);
        assert!(layout.chart.width > layout.sidebar.width);
    }

    #[test]
    fn test_narrow_terminal_drops_sidebar() {
        let layout = compute_layout(Rect::new(0, 0, 60, 24));
        assert_eq!(layout.sidebar.width, 0);
        assert_eq!(layout.chart.width, 60);
    }

    #[test]
    fn test_panels_cover_frame_height() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = compute_layout(area);
        let total = layout.header.height
            + layout.chart.height
            + layout.inputs.height
            + layout.status.height;
        assert_eq!(total, area.height);
    }
}
