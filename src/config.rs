use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::value_objects::TenantId;

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(String),
    InvalidVar(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} not set", name),
            ConfigError::InvalidVar(name, reason) => write!(f, "Invalid {}: {}", name, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    pub service_url: String,
    pub model: String,
    pub dimension: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

#[derive(Debug, Clone)]
pub struct AnswersConfig {
    pub service_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub signing_secret: String,
    pub url_ttl_secs: i64,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub top_k: i64,
    pub similarity_threshold: f32,
}

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub public_base_url: String,
    pub database_url: String,
    pub tenants: Vec<TenantId>,
    pub storage_root: PathBuf,
    pub embeddings: EmbeddingsConfig,
    pub answers: AnswersConfig,
    pub upload: UploadConfig,
    pub search: SearchConfig,
    pub worker_count: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = optional("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar("BIND_ADDR".to_string(), e.to_string()))?;

        let tenants = parse_tenant_list(&required("TENANTS")?)
            .map_err(|e| ConfigError::InvalidVar("TENANTS".to_string(), e))?;

        Ok(Self {
            bind_addr,
            public_base_url: optional("PUBLIC_BASE_URL", "http://localhost:3000"),
            database_url: required("DATABASE_URL")?,
            tenants,
            storage_root: PathBuf::from(optional("STORAGE_ROOT", "./storage")),
            embeddings: EmbeddingsConfig {
                service_url: required("EMBEDDINGS_SERVICE_URL")?,
                model: optional("EMBEDDING_MODEL", "titan-embed-text-v2"),
                dimension: parse_optional("EMBEDDING_DIMENSION", 1536)?,
                timeout_secs: parse_optional("EMBEDDINGS_TIMEOUT_SECS", 30)?,
                max_retries: parse_optional("EMBEDDINGS_MAX_RETRIES", 3)?,
                backoff_factor: parse_optional("EMBEDDINGS_BACKOFF_FACTOR", 1.5)?,
            },
            answers: AnswersConfig {
                service_url: required("ANSWER_SERVICE_URL")?,
                model: optional("ANSWER_MODEL", "claude-3-sonnet"),
                max_tokens: parse_optional("ANSWER_MAX_TOKENS", 500)?,
                timeout_secs: parse_optional("ANSWER_TIMEOUT_SECS", 60)?,
            },
            upload: UploadConfig {
                signing_secret: required("UPLOAD_SIGNING_SECRET")?,
                url_ttl_secs: parse_optional("UPLOAD_URL_TTL_SECS", 3600)?,
            },
            search: SearchConfig {
                top_k: parse_optional("SEARCH_TOP_K", 3)?,
                similarity_threshold: parse_optional("SIMILARITY_THRESHOLD", 0.7)?,
            },
            worker_count: parse_optional("SYNC_WORKER_COUNT", 3)?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_optional<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidVar(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// `TENANTS` is a comma-separated list of tenant ids.
fn parse_tenant_list(raw: &str) -> Result<Vec<TenantId>, String> {
    let tenants: Result<Vec<TenantId>, String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(TenantId::new)
        .collect();

    let tenants = tenants?;
    if tenants.is_empty() {
        return Err("At least one tenant is required".to_string());
    }
    Ok(tenants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenant_list() {
        let tenants = parse_tenant_list("acme, globex ,initech").unwrap();
        assert_eq!(tenants.len(), 3);
        assert_eq!(tenants[1].as_str(), "globex");
    }

    #[test]
    fn test_parse_tenant_list_rejects_bad_ids() {
        assert!(parse_tenant_list("acme,bad tenant").is_err());
        assert!(parse_tenant_list("").is_err());
        assert!(parse_tenant_list(" , ").is_err());
    }
}
