//! Session-token gate for admin endpoints.
//!
//! One compare-and-allow check in front of every mutating route: the
//! `Authorization: Bearer <token>` header must carry a valid admin session
//! token. Missing, malformed, expired, and wrong-signature tokens all yield
//! the same 401. Validated claims are inserted into request extensions so
//! handlers can attribute mutations.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::AppState;
use super::error::ApiError;

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = state
        .jwt
        .validate(token)
        .map_err(|_| ApiError::Unauthorized)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
