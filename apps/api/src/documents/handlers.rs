use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::latex::generate_latex;
use crate::documents::pdf::extract_pdf_text;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::templates::models::TemplateResponse;
use crate::templates::store::create_template;
use crate::templates::synthesis::synthesize_template;

#[derive(Debug, Serialize)]
pub struct ParsedDocumentResponse {
    pub filename: String,
    pub content: String,
    pub template: TemplateResponse,
}

#[derive(Debug, Deserialize)]
pub struct LatexRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub latex: String,
}

/// POST /pdf/parse
///
/// Reads the multipart `file` field, extracts its text and persists a template
/// synthesized from it. Other fields are ignored. A request that is not
/// `multipart/form-data` is rejected with a 400 `VALIDATION_ERROR`.
pub async fn handle_parse_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParsedDocumentResponse>, AppError> {
    let mut multipart = multipart?;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::Validation(
            "Missing multipart field 'file'".to_string(),
        ));
    };
    info!("Received {filename} ({} bytes)", data.len());

    let content = extract_pdf_text(data, &filename).await?;
    let proposal = synthesize_template(state.completion.as_ref(), &content, &filename).await?;
    let template = create_template(&state.db, &proposal).await?;

    Ok(Json(ParsedDocumentResponse {
        filename,
        content,
        template,
    }))
}

/// POST /latex/generate
pub async fn handle_generate_latex(
    State(state): State<AppState>,
    AppJson(request): AppJson<LatexRequest>,
) -> Result<Json<LatexResponse>, AppError> {
    let latex = generate_latex(state.completion.as_ref(), &request.content).await?;
    Ok(Json(LatexResponse { latex }))
}
