use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{TemplateRow, TemplateSectionRow, TemplateSubtitleRow};
use crate::templates::models::{
    NewTemplate, SectionResponse, SubtitleResponse, TemplateResponse,
};

/// Returns every template with its sections and subtitles in insertion order.
pub async fn list_templates(pool: &PgPool) -> Result<Vec<TemplateResponse>, sqlx::Error> {
    let templates =
        sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates ORDER BY created_at, id")
            .fetch_all(pool)
            .await?;
    assemble_templates(pool, templates).await
}

/// Returns one template with its nested structure, or `None` if the id is unknown.
pub async fn get_template(
    pool: &PgPool,
    template_id: Uuid,
) -> Result<Option<TemplateResponse>, sqlx::Error> {
    let template = sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates WHERE id = $1")
        .bind(template_id)
        .fetch_optional(pool)
        .await?;

    let Some(template) = template else {
        return Ok(None);
    };
    Ok(assemble_templates(pool, vec![template]).await?.pop())
}

/// Loads sections and subtitles for a batch of templates with two queries.
async fn assemble_templates(
    pool: &PgPool,
    templates: Vec<TemplateRow>,
) -> Result<Vec<TemplateResponse>, sqlx::Error> {
    let template_ids: Vec<Uuid> = templates.iter().map(|t| t.id).collect();

    let sections = sqlx::query_as::<_, TemplateSectionRow>(
        "SELECT * FROM template_sections WHERE template_id = ANY($1) ORDER BY template_id, position",
    )
    .bind(&template_ids)
    .fetch_all(pool)
    .await?;

    let section_ids: Vec<Uuid> = sections.iter().map(|s| s.id).collect();

    let subtitles = sqlx::query_as::<_, TemplateSubtitleRow>(
        "SELECT * FROM template_subtitles WHERE section_id = ANY($1) ORDER BY section_id, position",
    )
    .bind(&section_ids)
    .fetch_all(pool)
    .await?;

    let mut subtitles_by_section: HashMap<Uuid, Vec<SubtitleResponse>> = HashMap::new();
    for row in subtitles {
        subtitles_by_section
            .entry(row.section_id)
            .or_default()
            .push(SubtitleResponse {
                id: row.id,
                subtitle: row.subtitle,
            });
    }

    let mut sections_by_template: HashMap<Uuid, Vec<SectionResponse>> = HashMap::new();
    for row in sections {
        sections_by_template
            .entry(row.template_id)
            .or_default()
            .push(SectionResponse {
                id: row.id,
                title: row.title,
                subtitles: subtitles_by_section.remove(&row.id).unwrap_or_default(),
            });
    }

    Ok(templates
        .into_iter()
        .map(|t| TemplateResponse {
            sections: sections_by_template.remove(&t.id).unwrap_or_default(),
            id: t.id,
            name: t.name,
            description: t.description,
            icon: t.icon,
            created_at: t.created_at,
        })
        .collect())
}

/// Inserts a template, its sections and their subtitles on the given connection.
/// Callers pass a transaction so a failure part-way leaves nothing behind.
pub async fn insert_template(
    conn: &mut PgConnection,
    template: &NewTemplate,
) -> Result<Uuid, sqlx::Error> {
    let template_id = Uuid::new_v4();

    sqlx::query("INSERT INTO templates (id, name, description, icon) VALUES ($1, $2, $3, $4)")
        .bind(template_id)
        .bind(template.name.trim())
        .bind(&template.description)
        .bind(&template.icon)
        .execute(&mut *conn)
        .await?;

    for (section_position, section) in template.sections.iter().enumerate() {
        let section_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO template_sections (id, template_id, position, title) VALUES ($1, $2, $3, $4)",
        )
        .bind(section_id)
        .bind(template_id)
        .bind(section_position as i32)
        .bind(section.title.trim())
        .execute(&mut *conn)
        .await?;

        for (subtitle_position, subtitle) in section.subtitles.iter().enumerate() {
            sqlx::query(
                "INSERT INTO template_subtitles (id, section_id, position, subtitle) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(section_id)
            .bind(subtitle_position as i32)
            .bind(subtitle.trim())
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(template_id)
}

/// Validates and persists a template in one transaction, returning the stored shape.
/// Any write failure rolls back every row and surfaces as `AppError::Creation`.
pub async fn create_template(
    pool: &PgPool,
    template: &NewTemplate,
) -> Result<TemplateResponse, AppError> {
    template.validate()?;

    let mut tx = pool.begin().await?;
    let template_id = insert_template(&mut *tx, template)
        .await
        .map_err(|e| AppError::Creation(format!("Failed to create template: {e}")))?;
    tx.commit()
        .await
        .map_err(|e| AppError::Creation(format!("Failed to commit template: {e}")))?;

    info!(
        "Created template {template_id} '{}' with {} sections",
        template.name,
        template.sections.len()
    );

    get_template(pool, template_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
}
