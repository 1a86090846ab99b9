//! Derived project metrics: phase buckets relative to a given day and a team summary.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::CollaboratorRow;
use crate::projects::store::{load_collaborators, project_exists};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseDistribution {
    pub completed: usize,
    pub in_progress: usize,
    pub upcoming: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseMetrics {
    pub total_phases: usize,
    pub completed_phases: usize,
    pub in_progress_phases: usize,
    pub upcoming_phases: usize,
    pub completion_percentage: u32,
    pub phase_distribution: PhaseDistribution,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMetrics {
    pub total_members: usize,
    /// Every member counts as active; activity is not tracked.
    pub active_members: usize,
    pub team_members: Vec<TeamMember>,
    /// Always empty: roles are not modeled.
    pub roles_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetricsResponse {
    pub team: TeamMetrics,
    pub phases: PhaseMetrics,
    pub last_updated: NaiveDate,
}

/// Buckets `(start, end)` spans relative to `today`:
/// completed when `end < today`, upcoming when `start > today`, in progress otherwise.
/// The completion percentage is truncated and is 0 for an empty timeline.
pub fn compute_phase_metrics(
    spans: impl IntoIterator<Item = (NaiveDate, NaiveDate)>,
    today: NaiveDate,
) -> PhaseMetrics {
    let mut distribution = PhaseDistribution {
        completed: 0,
        in_progress: 0,
        upcoming: 0,
    };

    for (start, end) in spans {
        if end < today {
            distribution.completed += 1;
        } else if start > today {
            distribution.upcoming += 1;
        } else {
            distribution.in_progress += 1;
        }
    }

    let total = distribution.completed + distribution.in_progress + distribution.upcoming;
    let completion_percentage = if total == 0 {
        0
    } else {
        (distribution.completed * 100 / total) as u32
    };

    PhaseMetrics {
        total_phases: total,
        completed_phases: distribution.completed,
        in_progress_phases: distribution.in_progress,
        upcoming_phases: distribution.upcoming,
        completion_percentage,
        phase_distribution: distribution,
    }
}

pub fn team_metrics(members: Vec<CollaboratorRow>) -> TeamMetrics {
    let team_members: Vec<TeamMember> = members
        .into_iter()
        .map(|m| TeamMember {
            id: m.user_id,
            email: m.email,
            name: m.name,
        })
        .collect();

    TeamMetrics {
        total_members: team_members.len(),
        active_members: team_members.len(),
        team_members,
        roles_distribution: BTreeMap::new(),
    }
}

/// Loads a project's timeline spans and collaborators and computes its metrics as of `today`.
pub async fn project_metrics(
    pool: &PgPool,
    project_id: Uuid,
    today: NaiveDate,
) -> Result<ProjectMetricsResponse, AppError> {
    if !project_exists(pool, project_id).await? {
        return Err(AppError::NotFound(format!("Project {project_id} not found")));
    }

    let spans: Vec<(NaiveDate, NaiveDate)> = sqlx::query_as(
        "SELECT start_date, end_date FROM timeline_entries WHERE project_id = $1",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    let members = load_collaborators(pool, &[project_id]).await?;

    Ok(ProjectMetricsResponse {
        team: team_metrics(members),
        phases: compute_phase_metrics(spans, today),
        last_updated: today,
    })
}
