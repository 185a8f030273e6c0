//! Prompt templates for the two judging modes.
//!
//! Both templates ask for the same JSON shape; they differ only in the
//! ethical frame the model is told to judge from.

use crate::types::Mode;

/// Shared output contract appended to every judgment prompt.
const OUTPUT_RULES: &str = r#"
Score two things independently:
- "y": the weight of the ACT ITSELF, from -1.0 (gravely wrong) to 1.0 (clearly right).
- "x": the purity of the stated MOTIVE, from -1.0 (wholly self-serving or malicious) to 1.0 (wholly selfless).

If reasonable judges would disagree, also give "y_min"/"y_max" and
"x_min"/"x_max" as the plausible range of each score.

Respond ONLY with a JSON object with fields x, y and optionally
y_min, y_max, x_min, x_max. No prose."#;

const DUTY_FRAME: &str = r#"You judge acts by duty and rule.
Ask whether the act itself honors or violates moral duty, regardless of
what it happened to bring about. A lie stays a lie even when it helps."#;

const OUTCOME_FRAME: &str = r#"You judge acts by their consequences.
Ask what the act actually brought about for everyone affected, regardless
of rules. A lie that saves a life weighs as what it saved."#;

/// Build the full prompt for one submission.
pub fn judgment_prompt(mode: Mode, action: &str, intent: &str) -> String {
    let frame = match mode {
        Mode::Duty => DUTY_FRAME,
        Mode::Outcome => OUTCOME_FRAME,
    };
    format!(
        "{frame}\n\nThe act: {action}\nThe stated motive: {intent}\n{rules}",
        frame = frame,
        action = action.trim(),
        intent = intent.trim(),
        rules = OUTPUT_RULES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_both_texts() {
        let prompt = judgment_prompt(Mode::Duty, " stole bread ", "to feed a child");
        assert!(prompt.contains("stole bread"));
        assert!(prompt.contains("to feed a child"));
        assert!(prompt.contains("\"y_min\""));
    }

    #[test]
    fn test_prompt_differs_by_mode() {
        let duty = judgment_prompt(Mode::Duty, "lied", "kindness");
        let outcome = judgment_prompt(Mode::Outcome, "lied", "kindness");
        assert_ne!(duty, outcome);
        assert!(duty.contains("duty"));
        assert!(outcome.contains("consequences"));
    }
}
