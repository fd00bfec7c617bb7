use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, ImplementationStage};

/// One row of the per-tenant customer status view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerStatus {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub stage: ImplementationStage,
    pub status_summary: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneStatus {
    Planned,
    InProgress,
    Completed,
}

impl MilestoneStatus {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "Planned" => Ok(MilestoneStatus::Planned),
            "In Progress" => Ok(MilestoneStatus::InProgress),
            "Completed" => Ok(MilestoneStatus::Completed),
            other => Err(format!("Invalid milestone status: {}", other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MilestoneStatus::Planned => "Planned",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Completed => "Completed",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, MilestoneStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub milestone_id: String,
    pub customer_id: CustomerId,
    pub milestone_name: String,
    pub status: MilestoneStatus,
    pub planned_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Milestone {
    /// A milestone is overdue when its planned date has passed and it was
    /// never completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match (self.status.is_completed(), self.planned_date) {
            (false, Some(planned)) => planned < today,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    OnTrack,
    AtRisk,
}

impl HealthStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::OnTrack => "On Track",
            HealthStatus::AtRisk => "At Risk",
        }
    }
}

/// Status row combined with its milestone aggregates, the shape the
/// customer-status endpoint reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: CustomerStatus,
    pub milestones: Vec<Milestone>,
    pub completed_milestones: i64,
    pub total_milestones: i64,
    pub progress_percentage: f64,
    pub health: HealthStatus,
}

impl StatusReport {
    pub fn build(status: CustomerStatus, milestones: Vec<Milestone>, today: NaiveDate) -> Self {
        let total = milestones.len() as i64;
        let completed = milestones
            .iter()
            .filter(|m| m.status.is_completed())
            .count() as i64;
        let progress = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let health = if milestones.iter().any(|m| m.is_overdue(today)) {
            HealthStatus::AtRisk
        } else {
            HealthStatus::OnTrack
        };

        Self {
            status,
            milestones,
            completed_milestones: completed,
            total_milestones: total,
            progress_percentage: progress,
            health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> CustomerStatus {
        CustomerStatus {
            customer_id: CustomerId::new("cust-001").unwrap(),
            customer_name: "ACME Corp".to_string(),
            stage: ImplementationStage::Implementation,
            status_summary: Some("Phase 3 of 5 in progress.".to_string()),
            last_updated: Some(Utc::now()),
        }
    }

    fn milestone(id: &str, status: MilestoneStatus, planned: Option<&str>) -> Milestone {
        Milestone {
            milestone_id: id.to_string(),
            customer_id: CustomerId::new("cust-001").unwrap(),
            milestone_name: format!("Milestone {}", id),
            status,
            planned_date: planned.map(|d| d.parse().unwrap()),
            completion_date: None,
            notes: None,
        }
    }

    fn day(d: &str) -> NaiveDate {
        d.parse().unwrap()
    }

    #[test]
    fn test_progress_percentage() {
        let report = StatusReport::build(
            status(),
            vec![
                milestone("ms-1", MilestoneStatus::Completed, Some("2025-05-01")),
                milestone("ms-2", MilestoneStatus::Completed, Some("2025-06-01")),
                milestone("ms-3", MilestoneStatus::InProgress, Some("2025-12-01")),
                milestone("ms-4", MilestoneStatus::Planned, Some("2025-12-15")),
            ],
            day("2025-06-10"),
        );

        assert_eq!(report.completed_milestones, 2);
        assert_eq!(report.total_milestones, 4);
        assert_eq!(report.progress_percentage, 50.0);
        assert_eq!(report.health, HealthStatus::OnTrack);
    }

    #[test]
    fn test_overdue_milestone_flags_at_risk() {
        let report = StatusReport::build(
            status(),
            vec![
                milestone("ms-1", MilestoneStatus::Completed, Some("2025-05-01")),
                milestone("ms-2", MilestoneStatus::InProgress, Some("2025-06-01")),
            ],
            day("2025-06-10"),
        );

        assert_eq!(report.health, HealthStatus::AtRisk);
    }

    #[test]
    fn test_completed_milestones_never_overdue() {
        let late = milestone("ms-1", MilestoneStatus::Completed, Some("2020-01-01"));
        assert!(!late.is_overdue(day("2025-06-10")));
    }

    #[test]
    fn test_no_milestones_means_zero_progress_on_track() {
        let report = StatusReport::build(status(), Vec::new(), day("2025-06-10"));
        assert_eq!(report.progress_percentage, 0.0);
        assert_eq!(report.health, HealthStatus::OnTrack);
    }
}
