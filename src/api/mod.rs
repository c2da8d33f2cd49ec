/// HTTP client for the prompt-optimization backend.
///
/// Talks to the two JSON endpoints of the remote service using the
/// synchronous `ureq` HTTP client:
///
/// - **`POST /optimize-prompt`** — rewrite a prompt to be more
///   token-efficient and answer both variants for comparison.
/// - **`POST /analyze`** — score the rewrite for token reduction, answer
///   similarity, and estimated energy saved.
///
/// The backend contract has no status-code-specific handling: any non-2xx
/// status or unparseable body is a uniform pipeline failure. There is no
/// authentication, retry, or streaming.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /optimize-prompt`.
#[derive(Debug, Serialize)]
struct OptimizeRequest<'a> {
    prompt: &'a str,
}

/// Response body from `POST /optimize-prompt`.
///
/// Immutable once received; the session keeps it for display even when the
/// follow-up analyze call fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_prompt: String,
    pub optimized_answer: String,
    pub original_answer: String,
    /// Whether the backend served this result from a prior computation
    /// rather than generating it fresh.
    pub is_cached: bool,
}

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub original_answer: String,
    pub optimized_answer: String,
}

/// Response body from `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub energy_saved_watts: f64,
    /// Cosine similarity of the two answers, expected in [0, 1].
    pub similarity_score_cosine: f64,
    /// GPT-judged similarity of the two answers, expected in [0, 1].
    ///
    /// The wire name is `similarityScoreGPT` — the trailing acronym doesn't
    /// follow the camelCase rename rule.
    #[serde(rename = "similarityScoreGPT")]
    pub similarity_score_gpt: f64,
    pub original_tokens: u64,
    /// Expected to be ≤ `original_tokens`, but not enforced client-side.
    pub optimized_tokens: u64,
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// The interface the orchestrator consumes.
///
/// The remote service is an external collaborator; production uses
/// [`BackendClient`], tests substitute a scripted implementation.
pub trait PromptBackend {
    fn optimize(&self, prompt: &str) -> Result<OptimizeResponse>;
    fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous HTTP client for the optimization backend.
///
/// Created from the resolved [`ClientConfig`] and reused for the lifetime of
/// one session or one-shot invocation.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.backend_url, Duration::from_millis(config.timeout_ms))
    }

    /// Build a client against an explicit base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Check whether the backend is reachable.
    ///
    /// Any HTTP response counts — an error status still means a server is
    /// listening at the other end. Uses a short timeout so `health` doesn't
    /// stall on an unreachable host.
    pub fn is_reachable(&self) -> bool {
        let result = ureq::get(&self.base_url)
            .timeout(Duration::from_secs(5))
            .call();

        matches!(result, Ok(_) | Err(ureq::Error::Status(_, _)))
    }

    /// Base URL for logging and health output.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PromptBackend for BackendClient {
    fn optimize(&self, prompt: &str) -> Result<OptimizeResponse> {
        let url = format!("{}/optimize-prompt", self.base_url);

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(&OptimizeRequest { prompt })
            .context("optimize request failed")?;

        resp.into_json()
            .context("failed to parse optimize response")
    }

    fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let url = format!("{}/analyze", self.base_url);

        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(request)
            .context("analyze request failed")?;

        resp.into_json()
            .context("failed to parse analyze response")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = BackendClient::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn client_from_default_config() {
        let config = ClientConfig::default();
        let client = BackendClient::from_config(&config);
        assert_eq!(client.base_url(), config.backend_url);
        assert_eq!(client.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn optimize_response_deserializes_camel_case() {
        let json = r#"{
            "optimizedPrompt": "summarize article",
            "optimizedAnswer": "Short answer.",
            "originalAnswer": "Long answer.",
            "isCached": true
        }"#;
        let resp: OptimizeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.optimized_prompt, "summarize article");
        assert_eq!(resp.optimized_answer, "Short answer.");
        assert_eq!(resp.original_answer, "Long answer.");
        assert!(resp.is_cached);
    }

    #[test]
    fn analyze_response_deserializes_camel_case() {
        let json = r#"{
            "energySavedWatts": 0.0006,
            "similarityScoreCosine": 0.93,
            "similarityScoreGPT": 0.97,
            "originalTokens": 120,
            "optimizedTokens": 45
        }"#;
        let resp: AnalyzeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.energy_saved_watts, 0.0006);
        assert_eq!(resp.original_tokens, 120);
        assert_eq!(resp.optimized_tokens, 45);
    }

    #[test]
    fn analyze_request_serializes_camel_case() {
        let request = AnalyzeRequest {
            original_prompt: "op".to_string(),
            optimized_prompt: "tp".to_string(),
            original_answer: "oa".to_string(),
            optimized_answer: "ta".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["originalPrompt"], "op");
        assert_eq!(value["optimizedPrompt"], "tp");
        assert_eq!(value["originalAnswer"], "oa");
        assert_eq!(value["optimizedAnswer"], "ta");
    }

    #[test]
    fn optimize_request_body_shape() {
        let value = serde_json::to_value(OptimizeRequest { prompt: "hi" }).unwrap();
        assert_eq!(value, serde_json::json!({ "prompt": "hi" }));
    }
}
