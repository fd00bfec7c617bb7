use std::time::Duration;

use async_trait::async_trait;
use pgvector::Vector;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::ports::{EmbeddingProvider, EmbeddingProviderError};
use crate::config::EmbeddingsConfig;

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embeddings: Vec<Vec<f32>>,
}

/// HTTP client for the hosted text-embedding service. Transport failures are
/// retried with exponential backoff; API-level failures are not.
pub struct HttpEmbeddingsClient {
    client: Client,
    config: EmbeddingsConfig,
}

impl HttpEmbeddingsClient {
    pub fn new(config: EmbeddingsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn request_embeddings(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vector>, EmbeddingProviderError> {
        let mut attempt: u32 = 0;

        loop {
            match self.execute(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(EmbeddingProviderError::NetworkError(msg)) => {
                    if attempt >= self.config.max_retries {
                        return Err(EmbeddingProviderError::ServiceUnavailable(msg));
                    }
                    attempt += 1;
                    let backoff = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempt as i32 - 1) * 1000.0) as u64,
                    );
                    warn!(
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        "Embedding request failed, retrying: {}",
                        msg
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(other) => return Err(other),
            }
        }
    }

    async fn execute(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        let request = EmbeddingsRequest {
            model: &self.config.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.config.service_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingProviderError::ApiError(format!(
                "Embedding service returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }

        let mut vectors = Vec::with_capacity(parsed.embeddings.len());
        for embedding in parsed.embeddings {
            if embedding.len() != self.config.dimension {
                return Err(EmbeddingProviderError::ApiError(format!(
                    "Expected dimension {}, got {}",
                    self.config.dimension,
                    embedding.len()
                )));
            }
            vectors.push(Vector::from(embedding));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingsClient {
    async fn embed(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        if text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "Cannot embed empty text".to_string(),
            ));
        }

        let texts = vec![text.to_string()];
        let mut vectors = self.request_embeddings(&texts).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let input = vec!["hello".to_string(), "world".to_string()];
        let request = EmbeddingsRequest {
            model: "titan-embed-text-v2",
            input: &input,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "titan-embed-text-v2");
        assert_eq!(json["input"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"embeddings": [[0.1, 0.2], [0.3, 0.4]], "model": "titan-embed-text-v2"}"#;
        let parsed: EmbeddingsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.embeddings.len(), 2);
        assert_eq!(parsed.embeddings[0], vec![0.1, 0.2]);
    }
}
