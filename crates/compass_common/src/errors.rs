//! Error taxonomy for the analysis client.
//!
//! Transport, Status and Malformed are interchangeable at the retry-loop
//! boundary: each one burns an attempt, and once the attempts are gone the
//! caller sees only Exhausted. No partial result is ever accepted.

use thiserror::Error;

/// Fixed message shown to the user when a submission fails. The taxonomy
/// class that exhausted the attempts is logged, never surfaced.
pub const GENERIC_FAILURE: &str = "The model could not judge this scenario. Please try again.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network/transport failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the endpoint.
    #[error("endpoint returned status {status}")]
    Status { status: u16, body: String },

    /// Unparsable payload or missing expected fields.
    #[error("malformed model response: {0}")]
    Malformed(String),

    /// All retries spent. The only variant callers surface.
    #[error("analysis failed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl AnalysisError {
    /// The single user-visible message for any failed submission.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_surfaces_the_same_message() {
        let errors = [
            AnalysisError::Status {
                status: 503,
                body: "overloaded".to_string(),
            },
            AnalysisError::Malformed("no x field".to_string()),
            AnalysisError::Exhausted { attempts: 3 },
        ];
        for error in &errors {
            assert_eq!(error.user_message(), GENERIC_FAILURE);
        }
    }

    #[test]
    fn test_display_keeps_diagnostic_detail() {
        let error = AnalysisError::Exhausted { attempts: 3 };
        assert_eq!(error.to_string(), "analysis failed after 3 attempts");
    }
}
