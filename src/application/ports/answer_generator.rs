use async_trait::async_trait;

#[derive(Debug)]
pub enum AnswerGeneratorError {
    NetworkError(String),
    ApiError(String),
    EmptyCompletion,
}

impl std::fmt::Display for AnswerGeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerGeneratorError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AnswerGeneratorError::ApiError(msg) => write!(f, "API error: {}", msg),
            AnswerGeneratorError::EmptyCompletion => write!(f, "Model returned no completion"),
        }
    }
}

impl std::error::Error for AnswerGeneratorError {}

/// LLM backend used to phrase answers from retrieved context.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, prompt: &str) -> Result<String, AnswerGeneratorError>;

    fn model_name(&self) -> &str;
}
