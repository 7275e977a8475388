//! Trial-email handlers: the transactional send and the capped audit listing.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::storage::{EmailLog, NewEmailLog};

use super::AppState;
use super::error::ApiError;

/// Most rows the audit listing will ever return, regardless of `?limit=`.
const EMAIL_LOG_CAP: i64 = 200;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrialEmailRequest {
    pub to: Option<String>,
    #[serde(alias = "toName")]
    pub to_name: Option<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    #[serde(alias = "productName")]
    pub product_name: Option<String>,
    #[serde(alias = "downloadUrl")]
    pub download_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub limit: Option<i64>,
}

/// `POST /api/send-trial-email` - send one HTML email and append exactly one
/// audit row per attempt, success or failure.
///
/// `to`, `subject`, and `html` are required before any SMTP work happens; a
/// 400 writes no log row. The audit write itself is best-effort: its failure
/// is logged and swallowed so it never masks the real send outcome.
pub async fn send_trial_email(
    State(state): State<AppState>,
    Json(req): Json<TrialEmailRequest>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let (Some(to), Some(subject), Some(html)) = (&req.to, &req.subject, &req.html) else {
        return Err(ApiError::BadRequest(
            "to, subject and html are required".into(),
        ));
    };

    let mailer = state
        .mailer
        .as_ref()
        .ok_or(ApiError::Unavailable("mail transport not configured"))?;

    let outcome = mailer
        .send_html(to, req.to_name.as_deref(), subject, html)
        .await;

    if let Some(db) = &state.db {
        let log = NewEmailLog {
            recipient: to.clone(),
            subject: subject.clone(),
            product_name: req.product_name.clone(),
            download_url: req.download_url.clone(),
            status: if outcome.is_ok() { "sent" } else { "failed" }.to_owned(),
            error: outcome.as_ref().err().map(ToString::to_string),
        };
        if let Err(e) = db.insert_email_log(&log).await {
            warn!(error = %e, "Failed to write email log");
        }
    }

    let message_id = outcome?;
    info!(recipient = %to, %message_id, "Trial email sent");

    Ok(Json(SendEmailResponse {
        success: true,
        message_id,
    }))
}

/// `GET /api/email-logs?limit=N` - most recent audit rows, N capped at 200.
pub async fn list_email_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<EmailLog>>, ApiError> {
    let limit = query.limit.unwrap_or(50).clamp(1, EMAIL_LOG_CAP);
    Ok(Json(state.db()?.list_email_logs(limit).await?))
}
