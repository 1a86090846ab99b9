//! Project creation and deletion.
//!
//! Flow for creation: template lookup → (timeline generation when none is
//! supplied) → BEGIN → insert project → resolve and link collaborators →
//! insert timeline entries → COMMIT → re-read.
//!
//! The transaction is dropped uncommitted on every error path, which rolls it
//! back: readers never see a project without its timeline.

use std::collections::{HashMap, HashSet};

use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{CollaboratorPolicy, Config};
use crate::errors::AppError;
use crate::llm_client::CompletionService;
use crate::models::user::UserRow;
use crate::projects::models::{CreateProjectRequest, ProjectResponse};
use crate::projects::store::get_project;
use crate::templates::store::get_template;
use crate::timeline::generator::generate_timeline;
use crate::timeline::models::TimelineEntryDraft;

pub async fn create_project(
    pool: &PgPool,
    completion: &dyn CompletionService,
    config: &Config,
    request: CreateProjectRequest,
) -> Result<ProjectResponse, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if let Some(entries) = &request.timeline {
        for (index, entry) in entries.iter().enumerate() {
            entry.check().map_err(|problem| {
                AppError::Validation(format!("Timeline entry {index} {problem}"))
            })?;
        }
    }

    // Step 1: template must exist before anything is written or generated
    let template = get_template(pool, request.template_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Template {} not found", request.template_id))
        })?;

    // Step 1b: supplied timeline wins; otherwise generate one
    let timeline = match &request.timeline {
        Some(entries) => entries.clone(),
        None => {
            generate_timeline(
                completion,
                &request.brief(),
                &template.structure(),
                config.enforce_schedule_constraints,
            )
            .await?
        }
    };

    let mut tx = pool.begin().await?;

    // Step 2: project row
    let project_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO projects (id, title, description, start_date, deadline, template_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(project_id)
    .bind(request.title.trim())
    .bind(&request.description)
    .bind(request.start_date)
    .bind(request.deadline)
    .bind(request.template_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::Creation(format!("Failed to insert project: {e}")))?;

    // Step 3: collaborators
    let collaborators = resolve_collaborators(
        &mut *tx,
        &request.collaborators,
        config.collaborator_policy,
    )
    .await?;
    for user in &collaborators {
        sqlx::query(
            "INSERT INTO project_collaborators (project_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Creation(format!("Failed to link collaborator {}: {e}", user.email)))?;
    }

    // Step 4: timeline entries, in order
    insert_timeline_entries(&mut *tx, project_id, &timeline).await?;

    tx.commit()
        .await
        .map_err(|e| AppError::Creation(format!("Failed to commit project: {e}")))?;

    info!(
        "Created project {project_id} '{}' from template '{}' with {} collaborators and {} timeline entries",
        request.title.trim(),
        template.name,
        collaborators.len(),
        timeline.len()
    );

    // Step 5: assemble from storage so the response equals GET /project/:id
    get_project(pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))
}

/// Deletes a project and its timeline entries in one transaction.
pub async fn delete_project(pool: &PgPool, project_id: Uuid) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let entries = sqlx::query("DELETE FROM timeline_entries WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("Project {project_id} not found")));
    }

    tx.commit().await?;
    info!("Deleted project {project_id} and {entries} timeline entries");
    Ok(())
}

/// Resolves collaborator emails to users. Unknown emails either fail the
/// request (`Strict`) or are logged and left out (`Skip`).
async fn resolve_collaborators(
    conn: &mut PgConnection,
    emails: &[String],
    policy: CollaboratorPolicy,
) -> Result<Vec<UserRow>, AppError> {
    let wanted = distinct_emails(emails.iter().map(String::as_str));
    let users = find_users_by_email(conn, &wanted).await?;

    let found: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
    let missing: Vec<&str> = wanted
        .iter()
        .map(String::as_str)
        .filter(|email| !found.contains(email))
        .collect();

    if !missing.is_empty() {
        match policy {
            CollaboratorPolicy::Strict => {
                return Err(AppError::NotFound(format!(
                    "Collaborator(s) not found: {}",
                    missing.join(", ")
                )));
            }
            CollaboratorPolicy::Skip => {
                warn!("Skipping unknown collaborator(s): {}", missing.join(", "));
            }
        }
    }

    Ok(users)
}

async fn insert_timeline_entries(
    conn: &mut PgConnection,
    project_id: Uuid,
    timeline: &[TimelineEntryDraft],
) -> Result<(), AppError> {
    let responsible = distinct_emails(
        timeline
            .iter()
            .filter_map(|e| e.responsible_email.as_deref()),
    );
    let user_ids: HashMap<String, Uuid> = find_users_by_email(&mut *conn, &responsible)
        .await?
        .into_iter()
        .map(|u| (u.email, u.id))
        .collect();

    for (position, entry) in timeline.iter().enumerate() {
        let responsible_id = entry
            .responsible_email
            .as_deref()
            .and_then(|email| user_ids.get(email.trim()).copied());

        sqlx::query(
            r#"
            INSERT INTO timeline_entries
                (id, project_id, position, responsible_id, section, subtitle, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(position as i32)
        .bind(responsible_id)
        .bind(&entry.section)
        .bind(&entry.subtitle)
        .bind(&entry.description)
        .bind(entry.start)
        .bind(entry.end)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::Creation(format!("Failed to insert timeline entry {position}: {e}")))?;
    }

    Ok(())
}

async fn find_users_by_email(
    conn: &mut PgConnection,
    emails: &[String],
) -> Result<Vec<UserRow>, sqlx::Error> {
    if emails.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ANY($1) ORDER BY email")
        .bind(emails)
        .fetch_all(conn)
        .await
}

/// Trimmed, non-empty, first-occurrence-ordered emails.
fn distinct_emails<'a>(emails: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    emails
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .filter(|e| seen.insert(*e))
        .map(String::from)
        .collect()
}
