use serde::{Deserialize, Serialize};

/// Lifecycle state of an ingestion job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IngestionStatus {
    Pending,
    Processing,
    Completed,
    Failed(String),
}

impl IngestionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, IngestionStatus::Pending)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, IngestionStatus::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            IngestionStatus::Completed | IngestionStatus::Failed(_)
        )
    }

    pub fn can_transition_to(&self, next: &IngestionStatus) -> bool {
        matches!(
            (self, next),
            (IngestionStatus::Pending, IngestionStatus::Processing)
                | (IngestionStatus::Pending, IngestionStatus::Failed(_))
                | (IngestionStatus::Processing, IngestionStatus::Completed)
                | (IngestionStatus::Processing, IngestionStatus::Failed(_))
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            IngestionStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short form persisted in the jobs table; failure details go in the
    /// job's error_message column.
    pub fn as_str(&self) -> &str {
        match self {
            IngestionStatus::Pending => "pending",
            IngestionStatus::Processing => "processing",
            IngestionStatus::Completed => "completed",
            IngestionStatus::Failed(_) => "failed",
        }
    }

    pub fn from_parts(status: &str, error_message: Option<&str>) -> Result<Self, String> {
        match status {
            "pending" => Ok(IngestionStatus::Pending),
            "processing" => Ok(IngestionStatus::Processing),
            "completed" => Ok(IngestionStatus::Completed),
            "failed" => Ok(IngestionStatus::Failed(
                error_message.unwrap_or("Unknown error").to_string(),
            )),
            other => Err(format!("Invalid ingestion status: {}", other)),
        }
    }
}

impl Default for IngestionStatus {
    fn default() -> Self {
        IngestionStatus::Pending
    }
}

impl std::fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!IngestionStatus::Pending.is_terminal());
        assert!(!IngestionStatus::Processing.is_terminal());
        assert!(IngestionStatus::Completed.is_terminal());
        assert!(IngestionStatus::Failed("boom".to_string()).is_terminal());
    }

    #[test]
    fn test_valid_transitions() {
        let pending = IngestionStatus::Pending;
        let processing = IngestionStatus::Processing;
        let completed = IngestionStatus::Completed;
        let failed = IngestionStatus::Failed("boom".to_string());

        assert!(pending.can_transition_to(&processing));
        assert!(pending.can_transition_to(&failed));
        assert!(processing.can_transition_to(&completed));
        assert!(processing.can_transition_to(&failed));
        assert!(!pending.can_transition_to(&completed));
    }

    #[test]
    fn test_terminal_states_never_transition() {
        let completed = IngestionStatus::Completed;
        let failed = IngestionStatus::Failed("boom".to_string());

        for next in [
            IngestionStatus::Pending,
            IngestionStatus::Processing,
            IngestionStatus::Completed,
            IngestionStatus::Failed("again".to_string()),
        ] {
            assert!(!completed.can_transition_to(&next));
            assert!(!failed.can_transition_to(&next));
        }
    }

    #[test]
    fn test_persisted_form_roundtrip() {
        let failed = IngestionStatus::Failed("no such document".to_string());
        let parsed =
            IngestionStatus::from_parts(failed.as_str(), Some("no such document")).unwrap();
        assert_eq!(failed, parsed);

        assert!(IngestionStatus::from_parts("queued", None).is_err());
    }
}
