//! Admin handlers: login plus the gated product mutations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password;
use crate::storage::ProductPayload;

use super::AppState;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Mutation result shape; `id` is present only on create.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// `POST /api/admin/login` - verify credentials and issue a session token.
///
/// Unknown usernames and wrong passwords produce byte-identical 401 bodies;
/// nothing reveals whether the username existed.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let db = state.db()?;

    let admin = db
        .get_admin_by_username(&req.username)
        .await
        .map_err(|_| ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&req.password, &admin.password_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    if !valid {
        warn!(username = %req.username, "Failed admin login attempt");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt
        .issue(&admin.id.to_string(), &admin.username)
        .map_err(|e| ApiError::Internal(format!("token creation failed: {e}")))?;

    info!(admin_id = admin.id, username = %admin.username, "Admin logged in");

    Ok(Json(LoginResponse { token }))
}

/// `POST /api/admin/products` - create a product and synchronize its
/// dependent collections. Returns the generated id with 201.
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    payload.require_identity().map_err(ApiError::BadRequest)?;
    let db = state.db()?;

    let id = db.create_product(&payload).await?;
    db.sync_relations(id, &payload.relations).await?;

    info!(id, slug = payload.slug.as_deref().unwrap_or(""), "Product created");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            success: true,
            id: Some(id),
        }),
    ))
}

/// `PUT /api/admin/products/{id}` - full replacement of scalar fields and
/// relations. 404 when the product does not exist; never an upsert.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<MutationResponse>, ApiError> {
    let db = state.db()?;

    // Existence check first so an unknown id is a 404, not a silent create.
    db.get_product(id).await?;

    db.update_product(id, &payload).await?;
    db.sync_relations(id, &payload.relations).await?;

    info!(id, "Product updated");

    Ok(Json(MutationResponse {
        success: true,
        id: None,
    }))
}

/// `DELETE /api/admin/products/{id}` - schema-level cascade removes the four
/// dependent collections.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResponse>, ApiError> {
    let deleted = state.db()?.delete_product(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("product".into()));
    }

    info!(id, "Product deleted");

    Ok(Json(MutationResponse {
        success: true,
        id: None,
    }))
}
