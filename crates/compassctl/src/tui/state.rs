//! TUI state: inputs, mode, point store, selection, in-flight flag.

use crate::points::PointStore;
use compass_common::Mode;
use uuid::Uuid;

/// Which text field owns keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Action,
    Intent,
}

impl InputField {
    pub fn next(&self) -> InputField {
        match self {
            InputField::Action => InputField::Intent,
            InputField::Intent => InputField::Action,
        }
    }
}

pub struct PlotState {
    pub action_input: String,
    pub intent_input: String,
    pub focus: InputField,
    pub mode: Mode,
    pub points: PointStore,
    /// Index into the newest-first summary listing.
    pub selected: usize,
    /// True while a judgment is in flight; gates submission.
    pub busy: bool,
    pub thinking_frame: usize,
    pub status: String,
    pub show_help: bool,
    /// Point under the mouse pointer, gating the tooltip.
    pub hovered: Option<Uuid>,
    pub cache_entries: usize,
    pub model_label: String,
}

impl PlotState {
    pub fn new(model_label: String) -> Self {
        Self {
            action_input: String::new(),
            intent_input: String::new(),
            focus: InputField::Action,
            mode: Mode::default(),
            points: PointStore::new(),
            selected: 0,
            busy: false,
            thinking_frame: 0,
            status: "Describe a deed and its motive, then press Enter".to_string(),
            show_help: false,
            hovered: None,
            cache_entries: 0,
            model_label,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            InputField::Action => &mut self.action_input,
            InputField::Intent => &mut self.intent_input,
        }
    }

    /// Submission needs a non-empty action and no request in flight.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.action_input.trim().is_empty()
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = status.into();
    }

    /// Id of the point selected in the newest-first listing.
    pub fn selected_point_id(&self) -> Option<Uuid> {
        self.points.recent().nth(self.selected).map(|p| p.id)
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.points.len() {
            self.selected += 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        if self.points.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.points.len() {
            self.selected = self.points.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_common::{Point, Verdict};

    fn state_with_points(n: usize) -> PlotState {
        let mut state = PlotState::new("test-model".to_string());
        for i in 0..n {
            state.points.push(Point::from_verdict(
                &format!("act {}", i),
                "motive",
                Mode::Duty,
                Verdict {
                    x: 0.0,
                    y: 0.0,
                    x_range: None,
                    y_range: None,
                },
            ));
        }
        state
    }

    #[test]
    fn test_focus_cycles_between_fields() {
        assert_eq!(InputField::Action.next(), InputField::Intent);
        assert_eq!(InputField::Intent.next(), InputField::Action);
    }

    #[test]
    fn test_can_submit_requires_action_and_idle() {
        let mut state = state_with_points(0);
        assert!(!state.can_submit());

        state.action_input = "  returned the wallet ".to_string();
        assert!(state.can_submit());

        state.busy = true;
        assert!(!state.can_submit());
    }

    #[test]
    fn test_selected_id_follows_newest_first() {
        let state = state_with_points(3);
        // Selection 0 is the newest insertion.
        let id = state.selected_point_id().unwrap();
        assert_eq!(state.points.recent().next().unwrap().id, id);
    }

    #[test]
    fn test_selection_clamps_after_removal() {
        let mut state = state_with_points(2);
        state.selected = 1;
        let id = state.selected_point_id().unwrap();
        state.points.remove(id);
        state.clamp_selection();
        assert_eq!(state.selected, 0);
        assert!(state.selected_point_id().is_some());
    }

    #[test]
    fn test_select_next_stops_at_end() {
        let mut state = state_with_points(2);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
    }
}
