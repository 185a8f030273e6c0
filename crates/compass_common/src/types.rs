//! Core data model: judging modes, normalized verdicts, plotted points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum characters of action text kept in a point's display label.
const LABEL_MAX_CHARS: usize = 28;

/// How the model is instructed to judge a scenario.
///
/// `Duty` weighs the act against duty and rule, consequences aside;
/// `Outcome` weighs the act purely by what it brings about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Duty,
    Outcome,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Duty => "duty",
            Mode::Outcome => "outcome",
        }
    }

    /// The other variant. Used by the TUI mode toggle.
    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Duty => Mode::Outcome,
            Mode::Outcome => Mode::Duty,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Duty
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duty" => Ok(Mode::Duty),
            "outcome" => Ok(Mode::Outcome),
            other => Err(format!("unknown mode '{}' (expected duty|outcome)", other)),
        }
    }
}

/// Normalized analysis result: coordinates in [-1,1] plus optional
/// per-axis uncertainty bounds, after the cache policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Intent purity (motive), x-axis.
    pub x: f64,
    /// Action weight (the act itself), y-axis.
    pub y: f64,
    /// Inclusive (min, max) disagreement bounds on x, if the model gave any.
    pub x_range: Option<(f64, f64)>,
    /// Inclusive (min, max) disagreement bounds on y, if the model gave any.
    pub y_range: Option<(f64, f64)>,
}

impl Verdict {
    pub fn has_uncertainty(&self) -> bool {
        self.x_range.is_some() || self.y_range.is_some()
    }
}

/// One plotted scenario.
///
/// Created on successful analysis, mutated only through the
/// uncertainty-display toggle, destroyed on removal or bulk clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub id: Uuid,
    pub action: String,
    pub intent: String,
    pub label: String,
    pub mode: Mode,
    pub x: f64,
    pub y: f64,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    /// Whether the uncertainty ellipse is drawn for this point.
    pub show_uncertainty: bool,
    pub created_at: DateTime<Utc>,
}

impl Point {
    pub fn from_verdict(action: &str, intent: &str, mode: Mode, verdict: Verdict) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.trim().to_string(),
            intent: intent.trim().to_string(),
            label: display_label(action),
            mode,
            x: verdict.x,
            y: verdict.y,
            x_range: verdict.x_range,
            y_range: verdict.y_range,
            show_uncertainty: verdict.has_uncertainty(),
            created_at: Utc::now(),
        }
    }

    pub fn has_uncertainty(&self) -> bool {
        self.x_range.is_some() || self.y_range.is_some()
    }
}

/// Derive a short display label from the action text.
pub fn display_label(action: &str) -> String {
    let trimmed = action.trim();
    if trimmed.chars().count() <= LABEL_MAX_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(LABEL_MAX_CHARS - 1).collect();
    format!("{}…", head.trim_end())
}
