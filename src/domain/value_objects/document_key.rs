use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const RAW_PREFIX: &str = "documents/raw/";
pub const PROCESSED_PREFIX: &str = "documents/processed/";

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._/-]{1,255}$").unwrap())
}

fn unsafe_filename_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-zA-Z0-9._-]").unwrap())
}

/// Object key under the per-tenant document store. Raw uploads live under
/// `documents/raw/`; ingestion writes the normalized text under
/// `documents/processed/` with the same basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Build a fresh raw-document key for an uploaded filename:
    /// `documents/raw/{timestamp}_{8 hex}_{sanitized filename}`.
    pub fn new_raw(filename: &str, now: DateTime<Utc>) -> Self {
        let safe = sanitize_filename(filename);
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}_{}_{}",
            RAW_PREFIX,
            now.format("%Y%m%d_%H%M%S"),
            &suffix[..8],
            safe
        ))
    }

    /// Accept an externally supplied key. Only raw-document keys are valid
    /// input to sync and upload endpoints.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if !raw.starts_with(RAW_PREFIX) {
            return Err(format!("Document key must start with '{}'", RAW_PREFIX));
        }
        if raw.contains("..") || raw.contains("//") {
            return Err("Document key must not contain path traversal".to_string());
        }
        if !key_pattern().is_match(raw) {
            return Err("Document key contains invalid characters".to_string());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Key of the normalized-text artifact written after ingestion.
    pub fn processed_key(&self) -> String {
        format!("{}{}.txt", PROCESSED_PREFIX, self.basename())
    }
}

impl TryFrom<String> for DocumentKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DocumentKey::parse(&value)
    }
}

impl From<DocumentKey> for String {
    fn from(value: DocumentKey) -> Self {
        value.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn sanitize_filename(filename: &str) -> String {
    let safe = unsafe_filename_chars().replace_all(filename, "_");
    let mut safe = safe.into_owned();
    if safe.len() > 100 {
        safe.truncate(100);
    }
    if safe.is_empty() {
        safe.push_str("document");
    }
    safe
}
