//! Axum route handlers for the Matching API.
//!
//! Handlers only adapt HTTP to the pipeline: pick `top_n`, cap the resume
//! length, turn uploads into text. All matching happens in `run_pipeline`.

use std::collections::{BTreeMap, BTreeSet};

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::formatter::{MatchRecord, MatchSummary};
use crate::matching::skills::MatchSource;
use crate::matching::{run_pipeline, PipelineOutcome, NOTHING_TO_PROCESS_MESSAGE};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NothingToProcess,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub request_id: Uuid,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub skills: Vec<String>,
    pub skill_sources: BTreeMap<String, BTreeSet<MatchSource>>,
    pub matches: Vec<MatchRecord>,
    pub summary: Option<MatchSummary>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub synonyms: BTreeMap<String, Option<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let response = match_text(&state, &req.resume_text, req.top_n)?;
    Ok(Json(response))
}

/// POST /api/v1/match/upload
///
/// Multipart fields: `file` (PDF or UTF-8 text, required), `top_n` (optional).
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut top_n: Option<usize> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                let text =
                    extract_upload_text(bytes.to_vec(), file_name.as_deref(), content_type.as_deref())
                        .await?;
                resume_text = Some(text);
            }
            Some("top_n") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read top_n: {e}")))?;
                top_n = Some(raw.trim().parse().map_err(|_| {
                    AppError::Validation(format!("top_n must be a positive integer, got '{raw}'"))
                })?);
            }
            _ => {}
        }
    }

    let resume_text = resume_text
        .ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;
    let response = match_text(&state, &resume_text, top_n)?;
    Ok(Json(response))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let table = &state.catalog.skills;
    Json(SkillsResponse {
        skills: table.vocabulary.iter().map(str::to_string).collect(),
        synonyms: table
            .synonyms
            .iter()
            .map(|(alias, target)| (alias.to_string(), target.map(str::to_string)))
            .collect(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn match_text(
    state: &AppState,
    resume_text: &str,
    top_n: Option<usize>,
) -> Result<MatchResponse, AppError> {
    let request_id = Uuid::new_v4();
    let _span = info_span!("match", %request_id).entered();

    let top_n = top_n.unwrap_or(state.config.default_top_n);
    let text = truncate_chars(resume_text, state.config.max_resume_chars);
    if text.len() < resume_text.len() {
        warn!(
            limit = state.config.max_resume_chars,
            "Resume text truncated before matching"
        );
    }

    let outcome = run_pipeline(&state.catalog, text, top_n)?;
    let response = match outcome {
        PipelineOutcome::NothingToProcess => MatchResponse {
            request_id,
            status: MatchStatus::NothingToProcess,
            message: Some(NOTHING_TO_PROCESS_MESSAGE.to_string()),
            skills: Vec::new(),
            skill_sources: BTreeMap::new(),
            matches: Vec::new(),
            summary: None,
        },
        PipelineOutcome::Matched(report) => {
            info!(
                top_n,
                skills = report.skills.len(),
                matches = report.matches.len(),
                "Resume matched"
            );
            MatchResponse {
                request_id,
                status: MatchStatus::Matched,
                message: None,
                skills: report.skills,
                skill_sources: report.skill_sources,
                matches: report.matches,
                summary: Some(report.summary),
            }
        }
    };

    Ok(response)
}

/// Longest prefix of `text` holding at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

async fn extract_upload_text(
    bytes: Vec<u8>,
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, AppError> {
    let is_pdf = content_type == Some("application/pdf")
        || file_name.is_some_and(|n| n.to_lowercase().ends_with(".pdf"))
        || bytes.starts_with(b"%PDF");

    if is_pdf {
        // pdf-extract is CPU-bound and synchronous
        let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    AppError::UnprocessableEntity("Could not read PDF: malformed document".to_string())
                } else {
                    AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
                }
            })?;
        extracted.map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))
    } else {
        String::from_utf8(bytes)
            .map_err(|_| AppError::Validation("Uploaded file is neither PDF nor UTF-8 text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_plain_text_upload_decoded() {
        let text = extract_upload_text(b"Python and SQL".to_vec(), Some("cv.txt"), None)
            .await
            .unwrap();
        assert_eq!(text, "Python and SQL");
    }

    #[tokio::test]
    async fn test_binary_non_pdf_upload_rejected() {
        let err = extract_upload_text(vec![0xff, 0xfe, 0x00], Some("cv.docx"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_broken_pdf_is_unprocessable() {
        let err = extract_upload_text(b"%PDF-1.4 garbage".to_vec(), Some("cv.pdf"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
