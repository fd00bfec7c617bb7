use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Milestone, StatusReport};

#[derive(Debug, Deserialize)]
pub struct CustomerStatusRequestDto {
    pub tenant_id: String,
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MilestoneDto {
    pub milestone_id: String,
    pub milestone_name: String,
    pub status: String,
    pub planned_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<Milestone> for MilestoneDto {
    fn from(milestone: Milestone) -> Self {
        Self {
            milestone_id: milestone.milestone_id,
            milestone_name: milestone.milestone_name,
            status: milestone.status.as_str().to_string(),
            planned_date: milestone.planned_date,
            completion_date: milestone.completion_date,
            notes: milestone.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerStatusResponseDto {
    pub customer_id: String,
    pub customer_name: String,
    pub current_stage: String,
    pub stage_order: i32,
    pub status_summary: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub health_status: String,
    pub progress_percentage: f64,
    pub completed_milestones: i64,
    pub total_milestones: i64,
    pub milestones: Vec<MilestoneDto>,
}

impl From<StatusReport> for CustomerStatusResponseDto {
    fn from(report: StatusReport) -> Self {
        Self {
            customer_id: report.status.customer_id.as_str().to_string(),
            customer_name: report.status.customer_name.clone(),
            current_stage: report.status.stage.as_str().to_string(),
            stage_order: report.status.stage.order(),
            status_summary: report.status.status_summary.clone(),
            last_updated: report.status.last_updated,
            health_status: report.health.as_str().to_string(),
            progress_percentage: report.progress_percentage,
            completed_milestones: report.completed_milestones,
            total_milestones: report.total_milestones,
            milestones: report.milestones.into_iter().map(MilestoneDto::from).collect(),
        }
    }
}
