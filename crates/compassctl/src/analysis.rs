//! Analysis client: one outbound judgment call per submission, wrapped in
//! bounded exponential-backoff retry and the session cache policy.
//!
//! The cache stores only the action weight (y and its bounds). A repeated
//! action under the same mode replays the stored weight no matter what the
//! model returns; the intent axis (x) is always taken from the latest
//! response.

use compass_common::{
    cache::{CachedWeight, JudgmentCache},
    config::{CompassConfig, ModelConfig},
    errors::AnalysisError,
    prompts::judgment_prompt,
    schemas::{GenerateRequest, GenerateResponse, ModelJudgment},
    types::{Mode, Verdict},
};
use std::time::Duration;
use tracing::{debug, warn};

/// One attempt against the model. Retry lives in [`AnalysisClient`], not here.
#[allow(async_fn_in_trait)]
pub trait JudgmentSource {
    async fn fetch(&self, prompt: &str) -> Result<ModelJudgment, AnalysisError>;
}

/// Production source: generateContent over HTTPS.
pub struct GeminiSource {
    http: reqwest::Client,
    config: ModelConfig,
    api_key: String,
}

impl GeminiSource {
    /// A missing key is carried as an empty string: the endpoint rejects
    /// the request and the failure flows through the normal retry path.
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
            config: config.clone(),
            api_key: CompassConfig::api_key().unwrap_or_default(),
        }
    }
}

impl JudgmentSource for GeminiSource {
    async fn fetch(&self, prompt: &str) -> Result<ModelJudgment, AnalysisError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.api_key
        );
        let request = GenerateRequest::for_prompt(prompt);

        debug!("[>] judgment call [{}]", self.config.model);

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!("[-] endpoint error {}: {}", status, body);
            return Err(AnalysisError::Status { status, body });
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(format!("invalid envelope: {}", e)))?;

        let text = envelope
            .first_text()
            .ok_or_else(|| AnalysisError::Malformed("no candidate text".to_string()))?;

        debug!("[<] judgment response ({} chars)", text.len());

        parse_judgment(text)
    }
}

/// The point-cache-and-retry client.
pub struct AnalysisClient<S> {
    source: S,
    cache: JudgmentCache,
    attempts: u32,
    backoff_base: Duration,
}

impl AnalysisClient<GeminiSource> {
    pub fn from_config(config: &CompassConfig) -> Self {
        Self::with_source(
            GeminiSource::new(&config.model),
            config.model.attempts,
            Duration::from_secs(1),
        )
    }
}

impl<S: JudgmentSource> AnalysisClient<S> {
    pub fn with_source(source: S, attempts: u32, backoff_base: Duration) -> Self {
        Self {
            source,
            cache: JudgmentCache::new(),
            attempts: attempts.max(1),
            backoff_base,
        }
    }

    /// Judge one scenario. Takes `&mut self`, so a second submission cannot
    /// start until the first settles.
    pub async fn analyze(
        &mut self,
        action: &str,
        intent: &str,
        mode: Mode,
    ) -> Result<Verdict, AnalysisError> {
        let prompt = judgment_prompt(mode, action, intent);

        for attempt in 0..self.attempts {
            match self.source.fetch(&prompt).await {
                Ok(judgment) => return Ok(self.settle(mode, action, judgment)),
                Err(e) => {
                    warn!(
                        "analysis attempt {}/{} failed: {}",
                        attempt + 1,
                        self.attempts,
                        e
                    );
                    if attempt + 1 < self.attempts {
                        tokio::time::sleep(backoff_delay(self.backoff_base, attempt)).await;
                    }
                }
            }
        }

        Err(AnalysisError::Exhausted {
            attempts: self.attempts,
        })
    }

    /// Apply the cache override policy to a fresh judgment.
    fn settle(&mut self, mode: Mode, action: &str, judgment: ModelJudgment) -> Verdict {
        let mut verdict = verdict_from(judgment);
        let key = JudgmentCache::key(mode, action);

        if let Some(cached) = self.cache.get(&key) {
            debug!(
                "cache hit for '{}': fresh weight {} replaced by stored {}",
                key, verdict.y, cached.y
            );
            verdict.y = cached.y;
            verdict.y_range = cached.y_range;
        } else {
            self.cache.put(
                key,
                CachedWeight {
                    y: verdict.y,
                    y_range: verdict.y_range,
                },
            );
        }

        verdict
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Wait before retry `attempt + 1`: 2^attempt times the base.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt)
}

/// Normalize a raw judgment: clamp coordinates to [-1,1], keep a bound
/// pair only when both ends are present, and order each pair.
pub fn verdict_from(judgment: ModelJudgment) -> Verdict {
    Verdict {
        x: clamp_unit(judgment.x),
        y: clamp_unit(judgment.y),
        x_range: bound_pair(judgment.x_min, judgment.x_max),
        y_range: bound_pair(judgment.y_min, judgment.y_max),
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

fn bound_pair(min: Option<f64>, max: Option<f64>) -> Option<(f64, f64)> {
    match (min, max) {
        (Some(a), Some(b)) => {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Some((clamp_unit(lo), clamp_unit(hi)))
        }
        _ => None,
    }
}

/// Parse the model payload, tolerating prose around the JSON object.
pub fn parse_judgment(text: &str) -> Result<ModelJudgment, AnalysisError> {
    if let Ok(judgment) = serde_json::from_str::<ModelJudgment>(text) {
        return Ok(judgment);
    }

    let json_text = extract_json(text);
    if let Ok(judgment) = serde_json::from_str::<ModelJudgment>(&json_text) {
        return Ok(judgment);
    }

    let value: serde_json::Value = serde_json::from_str(&json_text)
        .map_err(|e| AnalysisError::Malformed(format!("unparsable payload: {}", e)))?;

    let x = value
        .get("x")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| AnalysisError::Malformed("missing field x".to_string()))?;
    let y = value
        .get("y")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| AnalysisError::Malformed("missing field y".to_string()))?;

    let bound = |name: &str| value.get(name).and_then(|v| v.as_f64());

    Ok(ModelJudgment {
        x,
        y,
        y_min: bound("y_min"),
        y_max: bound("y_max"),
        x_min: bound("x_min"),
        x_max: bound("x_max"),
    })
}

/// Extract a JSON object from text that may have prose around it.
fn extract_json(text: &str) -> String {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return text[start..=end].to_string();
        }
    }
    text.to_string()
}
