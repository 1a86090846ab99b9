use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{ProjectRow, TimelineEntryRow};
use crate::models::user::CollaboratorRow;
use crate::projects::models::ProjectResponse;

const PROJECT_SELECT: &str = r#"
    SELECT p.id, p.title, p.description, p.start_date, p.deadline, p.template_id,
           t.name AS template_name, p.created_at
    FROM projects p
    JOIN templates t ON t.id = p.template_id
"#;

/// Returns every project in creation order, fully assembled.
pub async fn list_projects(pool: &PgPool) -> Result<Vec<ProjectResponse>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        "{PROJECT_SELECT} ORDER BY p.created_at, p.id"
    ))
    .fetch_all(pool)
    .await?;
    assemble_projects(pool, rows).await
}

/// Returns one project, or `None` if the id is unknown.
pub async fn get_project(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Option<ProjectResponse>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(&format!("{PROJECT_SELECT} WHERE p.id = $1"))
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(assemble_projects(pool, vec![row]).await?.pop())
}

pub async fn project_exists(pool: &PgPool, project_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
        .bind(project_id)
        .fetch_one(pool)
        .await
}

/// Collaborators of the given projects, ordered by email within each project.
pub async fn load_collaborators(
    pool: &PgPool,
    project_ids: &[Uuid],
) -> Result<Vec<CollaboratorRow>, sqlx::Error> {
    sqlx::query_as::<_, CollaboratorRow>(
        r#"
        SELECT pc.project_id, u.id AS user_id, u.email, u.name
        FROM project_collaborators pc
        JOIN users u ON u.id = pc.user_id
        WHERE pc.project_id = ANY($1)
        ORDER BY pc.project_id, u.email
        "#,
    )
    .bind(project_ids)
    .fetch_all(pool)
    .await
}

/// Timeline entries of the given projects in stored order, with the
/// responsible user's email joined in.
pub async fn load_timeline(
    pool: &PgPool,
    project_ids: &[Uuid],
) -> Result<Vec<TimelineEntryRow>, sqlx::Error> {
    sqlx::query_as::<_, TimelineEntryRow>(
        r#"
        SELECT te.id, te.project_id, te.section, te.subtitle,
               u.email AS responsible_email, te.description, te.start_date, te.end_date
        FROM timeline_entries te
        LEFT JOIN users u ON u.id = te.responsible_id
        WHERE te.project_id = ANY($1)
        ORDER BY te.project_id, te.position
        "#,
    )
    .bind(project_ids)
    .fetch_all(pool)
    .await
}

async fn assemble_projects(
    pool: &PgPool,
    rows: Vec<ProjectRow>,
) -> Result<Vec<ProjectResponse>, sqlx::Error> {
    let project_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let mut collaborators: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in load_collaborators(pool, &project_ids).await? {
        collaborators.entry(row.project_id).or_default().push(row.email);
    }

    let mut timelines: HashMap<Uuid, Vec<TimelineEntryRow>> = HashMap::new();
    for entry in load_timeline(pool, &project_ids).await? {
        timelines.entry(entry.project_id).or_default().push(entry);
    }

    Ok(rows
        .into_iter()
        .map(|row| ProjectResponse {
            collaborators: collaborators.remove(&row.id).unwrap_or_default(),
            timeline: timelines.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            description: row.description,
            template_id: row.template_id,
            template: row.template_name,
            start_date: row.start_date,
            deadline: row.deadline,
            created_at: row.created_at,
        })
        .collect())
}
