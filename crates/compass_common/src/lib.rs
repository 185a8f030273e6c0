//! Compass Common - Shared types and schemas for the compass plotter
//!
//! Everything both the control binary and future surfaces need: the point
//! and mode types, the generateContent wire schemas, prompt templates,
//! configuration, the error taxonomy, and the session judgment cache.

pub mod cache;
pub mod config;
pub mod errors;
pub mod prompts;
pub mod schemas;
pub mod types;

pub use cache::{CachedWeight, JudgmentCache};
pub use config::{CompassConfig, ModelConfig, API_KEY_ENV};
pub use errors::AnalysisError;
pub use schemas::{GenerateRequest, GenerateResponse, ModelJudgment};
pub use types::{Mode, Point, Verdict};
