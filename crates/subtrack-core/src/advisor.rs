//! Optional advisory enrichment
//!
//! An [`AdvisorBackend`] turns the subscription collection into a short
//! list of [`Recommendation`]s via an external text-generation service.
//! The deterministic insight heuristics never depend on this module:
//! when no backend is configured, or the backend fails or returns a
//! payload that does not parse, callers fall back to a built-in
//! recommendation set through [`recommend_or_fallback`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Impact, Recommendation, RecommendationCategory, Subscription};

/// Environment variable selecting the advisor backend ("http" or "mock")
pub const ADVISOR_BACKEND_ENV: &str = "SUBTRACK_ADVISOR_BACKEND";
/// Environment variable naming the generate endpoint host
pub const ADVISOR_HOST_ENV: &str = "SUBTRACK_ADVISOR_HOST";
/// Environment variable naming the model to request
pub const ADVISOR_MODEL_ENV: &str = "SUBTRACK_ADVISOR_MODEL";

/// Model requested when `SUBTRACK_ADVISOR_MODEL` is unset
pub const DEFAULT_ADVISOR_MODEL: &str = "llama3.2";

/// A source of advisory recommendations
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Produce recommendations for the given collection
    async fn recommend(&self, subscriptions: &[Subscription]) -> Result<Vec<Recommendation>>;

    /// Human-readable backend name for logging
    fn name(&self) -> &str;
}

/// Backend that asks a remote text-generation service
///
/// Speaks the Ollama-style generate API: a single POST with the prompt,
/// answered by a JSON object whose `response` field carries the model
/// output. The output itself is expected to be a JSON array of
/// recommendations, possibly wrapped in a markdown code fence.
#[derive(Debug, Clone)]
pub struct HttpAdvisor {
    http_client: Client,
    base_url: String,
    model: String,
}

impl HttpAdvisor {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Build from `SUBTRACK_ADVISOR_HOST` / `SUBTRACK_ADVISOR_MODEL`,
    /// or `None` when no host is configured
    pub fn from_env() -> Option<Self> {
        let host = std::env::var(ADVISOR_HOST_ENV).ok()?;
        let model = std::env::var(ADVISOR_MODEL_ENV)
            .unwrap_or_else(|_| DEFAULT_ADVISOR_MODEL.to_string());
        Some(Self::new(&host, &model))
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl AdvisorBackend for HttpAdvisor {
    async fn recommend(&self, subscriptions: &[Subscription]) -> Result<Vec<Recommendation>> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(subscriptions),
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let generate: GenerateResponse = response.json().await?;
        parse_recommendations(&generate.response)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Backend for tests and offline development
#[derive(Debug, Clone)]
pub struct MockAdvisor {
    healthy: bool,
}

impl MockAdvisor {
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// A mock whose calls always fail
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

impl Default for MockAdvisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisorBackend for MockAdvisor {
    async fn recommend(&self, subscriptions: &[Subscription]) -> Result<Vec<Recommendation>> {
        if !self.healthy {
            return Err(Error::Advisor("mock advisor is unhealthy".to_string()));
        }
        Ok(vec![Recommendation {
            title: "Mock Advisory".to_string(),
            description: format!("Reviewed {} subscriptions.", subscriptions.len()),
            category: RecommendationCategory::Efficiency,
            impact: Impact::Low,
        }])
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Unified advisor client that dispatches to a concrete backend
#[derive(Debug, Clone)]
pub enum AdvisorClient {
    Http(HttpAdvisor),
    Mock(MockAdvisor),
}

impl AdvisorClient {
    /// Pick a backend from the environment
    ///
    /// `SUBTRACK_ADVISOR_BACKEND=mock` forces the mock; otherwise an
    /// HTTP backend is built when `SUBTRACK_ADVISOR_HOST` is set.
    /// Returns `None` when nothing is configured, which callers treat
    /// as "advisory disabled".
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var(ADVISOR_BACKEND_ENV)
            .unwrap_or_else(|_| "http".to_string())
            .to_lowercase();

        match backend.as_str() {
            "mock" => Some(AdvisorClient::Mock(MockAdvisor::new())),
            "http" => HttpAdvisor::from_env().map(AdvisorClient::Http),
            other => {
                tracing::warn!(backend = %other, "Unknown advisor backend, advisory disabled");
                None
            }
        }
    }

    pub fn http(base_url: &str, model: &str) -> Self {
        AdvisorClient::Http(HttpAdvisor::new(base_url, model))
    }

    pub fn mock() -> Self {
        AdvisorClient::Mock(MockAdvisor::new())
    }
}

#[async_trait]
impl AdvisorBackend for AdvisorClient {
    async fn recommend(&self, subscriptions: &[Subscription]) -> Result<Vec<Recommendation>> {
        match self {
            AdvisorClient::Http(backend) => backend.recommend(subscriptions).await,
            AdvisorClient::Mock(backend) => backend.recommend(subscriptions).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            AdvisorClient::Http(backend) => backend.name(),
            AdvisorClient::Mock(backend) => backend.name(),
        }
    }
}

/// Ask the backend for recommendations, falling back to the built-in
/// set on absence or any failure
///
/// An empty collection yields no recommendations at all.
pub async fn recommend_or_fallback(
    backend: Option<&AdvisorClient>,
    subscriptions: &[Subscription],
) -> Vec<Recommendation> {
    if subscriptions.is_empty() {
        return Vec::new();
    }

    if let Some(backend) = backend {
        match backend.recommend(subscriptions).await {
            Ok(recommendations) if !recommendations.is_empty() => return recommendations,
            Ok(_) => {
                tracing::warn!(
                    backend = backend.name(),
                    "Advisor returned nothing, using fallback recommendations"
                );
            }
            Err(e) => {
                tracing::warn!(
                    backend = backend.name(),
                    error = %e,
                    "Advisor unavailable, using fallback recommendations"
                );
            }
        }
    }

    fallback_recommendations()
}

/// The deterministic recommendation set shown when no advisor answers
pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            title: "Consolidate Multi-Vendor SaaS".to_string(),
            description: "Consolidating 3 productivity tools into 1 suite saves $4,200 annually."
                .to_string(),
            category: RecommendationCategory::Savings,
            impact: Impact::High,
        },
        Recommendation {
            title: "Staggered Billing Cycle".to_string(),
            description: "Moving AWS to Annual would improve efficiency by 15%.".to_string(),
            category: RecommendationCategory::Efficiency,
            impact: Impact::Medium,
        },
        Recommendation {
            title: "Review Underutilized Seats".to_string(),
            description: "VPN effectiveness is at 60% based on user count.".to_string(),
            category: RecommendationCategory::Effectiveness,
            impact: Impact::High,
        },
    ]
}

/// Render the prompt sent to the generation endpoint
fn build_prompt(subscriptions: &[Subscription]) -> String {
    let summary = subscriptions
        .iter()
        .map(|s| {
            format!(
                "{}: {} {} ({}) in {}",
                s.name, s.regular_price, s.price_currency, s.billing_cycle, s.category
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze these IT subscriptions: {}. \
         Provide exactly 4 insights geared towards Savings, Efficiency, Effectiveness, and Growth. \
         Return as a JSON array of objects with keys: \"title\", \"description\", \"category\" \
         (Savings|Efficiency|Effectiveness), and \"impact\" (High|Medium|Low). \
         Keep descriptions concise and data-driven.",
        summary
    )
}

/// Parse model output into recommendations, tolerating markdown fences
fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim())
        .map_err(|e| Error::Advisor(format!("Malformed recommendation payload: {}", e)))
}
