//! Create-recipe gateway: forwards a draft to the recipe API.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::PageCache;
use crate::config::Config;
use crate::draft::DraftRecipe;
use crate::error::GatewayError;
use crate::nav::paths;

/// Creation endpoint, relative to the API base URL.
pub const PATH: &str = "/api/recipes";

/// Trait for the recipe API, enabling mockability in tests.
///
/// One call is one attempt; callers retry by calling again.
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Submit a draft. Returns the created recipe as sent back by the API.
    async fn create_recipe(&self, draft: &DraftRecipe) -> Result<serde_json::Value, GatewayError>;
}

/// Gateway backed by the HTTP recipe API.
pub struct HttpGateway {
    inner: reqwest::Client,
    endpoint: String,
    cache: Arc<PageCache>,
}

impl HttpGateway {
    pub fn new(config: &Config, cache: Arc<PageCache>) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Essenza/{}", crate::BUILD_ID))
            .build()?;

        Ok(Self {
            inner,
            endpoint: format!("{}{}", config.api_url, PATH),
            cache,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecipeGateway for HttpGateway {
    async fn create_recipe(&self, draft: &DraftRecipe) -> Result<serde_json::Value, GatewayError> {
        let form = draft.to_form()?;

        tracing::debug!(url = %self.endpoint, title = %draft.title, "network: creating recipe");
        let response = self.inner.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.endpoint, status = %status, "network: create failed");
            return Err(GatewayError::SaveFailed {
                status: status.as_u16(),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        self.cache.revalidate_path(paths::RECIPES);
        tracing::info!(url = %self.endpoint, status = %status, "recipe created");

        Ok(data)
    }
}

/// Mock response for testing.
#[derive(Clone, Debug)]
pub enum MockResponse {
    Created(serde_json::Value),
    /// Non-2xx status from the API.
    Status(u16),
    /// Transport-level failure with the given message.
    Fault(String),
}

/// Mock gateway for testing. Replays queued responses in order and records
/// every draft it receives.
pub struct MockGateway {
    responses: Mutex<VecDeque<MockResponse>>,
    received: Mutex<Vec<DraftRecipe>>,
    delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_response(self, response: MockResponse) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }

    pub fn with_created(self, data: serde_json::Value) -> Self {
        self.with_response(MockResponse::Created(data))
    }

    pub fn with_status(self, status: u16) -> Self {
        self.with_response(MockResponse::Status(status))
    }

    pub fn with_fault(self, message: &str) -> Self {
        self.with_response(MockResponse::Fault(message.to_string()))
    }

    /// Simulate network latency before each response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Drafts received so far, in call order.
    pub fn received(&self) -> Vec<DraftRecipe> {
        self.received
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeGateway for MockGateway {
    async fn create_recipe(&self, draft: &DraftRecipe) -> Result<serde_json::Value, GatewayError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(draft.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.responses.lock().ok().and_then(|mut r| r.pop_front());
        match next {
            Some(MockResponse::Created(data)) => Ok(data),
            Some(MockResponse::Status(status)) => Err(GatewayError::SaveFailed { status }),
            Some(MockResponse::Fault(message)) => Err(GatewayError::Fault(message)),
            None => Err(GatewayError::Fault("No mock response queued".to_string())),
        }
    }
}
