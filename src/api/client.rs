//! HTTP client for the answering service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Instant;

use crate::config::Config;

use super::error::RequestError;
use super::types::{AnswerPayload, ErrorBody, QueryRequest};

/// Something that can answer a question.
///
/// The query store only talks to this trait, so tests can substitute a
/// scripted service for the real HTTP client.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask a single question. The caller guarantees `question` is not blank.
    async fn submit(&self, question: &str) -> Result<AnswerPayload, RequestError>;
}

/// Client for `POST /api/query`.
///
/// Sends exactly one request per call. No retries and no timeouts beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
    endpoint: Url,
    user_id: String,
}

impl QueryClient {
    /// Build a client for `endpoint`, identifying the session as `user_id`.
    pub fn new(endpoint: Url, user_id: impl Into<String>) -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(concat!("gastroassist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            user_id: user_id.into(),
        })
    }

    /// Build a client from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, RequestError> {
        let endpoint = config
            .server
            .endpoint()
            .map_err(|e| RequestError::InvalidEndpoint(e.to_string()))?;
        Self::new(endpoint, config.session.user_id.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn post_query(&self, question: &str) -> Result<AnswerPayload, RequestError> {
        let body = QueryRequest {
            text: question,
            user_id: &self.user_id,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let detail = ErrorBody::detail_from_bytes(&bytes);
            tracing::warn!(
                status = status.as_u16(),
                latency_ms,
                detail = detail.as_deref().unwrap_or("<none>"),
                "Query rejected by server"
            );
            return Err(RequestError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: AnswerPayload = serde_json::from_slice(&bytes)
            .map_err(|e| RequestError::Decode(e.to_string()))?;

        tracing::info!(
            status = status.as_u16(),
            latency_ms,
            sources = payload.sources.len(),
            confidence = payload.confidence_score,
            "Query answered"
        );

        Ok(payload)
    }
}

#[async_trait]
impl AnswerService for QueryClient {
    async fn submit(&self, question: &str) -> Result<AnswerPayload, RequestError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            question_len = question.len(),
            "Sending query"
        );

        self.post_query(question).await.inspect_err(|err| {
            if let RequestError::Transport(message) | RequestError::Decode(message) = err {
                tracing::error!(error = %message, "Query request failed");
            }
        })
    }
}
