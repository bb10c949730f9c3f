use crate::AppState;
use crate::api::error::AppError;
use crate::services::registry::ConfirmOutcome;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct CreateAssetResponse {
    pub upload_url: String,
    pub id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ConfirmUploadRequest {
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ConfirmUploadResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct DownloadAssetResponse {
    pub download_url: String,
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub timeout: Option<String>,
}

/// Download URL lifetime in seconds. Anything absent, non-numeric or
/// non-positive falls back to 60.
fn resolve_timeout(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok())
        .filter(|&t| t > 0)
        .unwrap_or(60)
}

#[utoipa::path(
    post,
    path = "/asset",
    responses(
        (status = 200, description = "Asset created, signed upload URL issued", body = CreateAssetResponse),
        (status = 500, description = "Storage provider failed to sign the URL")
    ),
    tag = "assets"
)]
pub async fn create_asset(
    State(state): State<AppState>,
) -> Result<Json<CreateAssetResponse>, AppError> {
    let id = Uuid::new_v4().to_string();

    let upload_url = state
        .storage
        .issue_upload_url(&id, state.config.upload_url_ttl_secs)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue upload URL for asset {}: {:?}", id, e);
            AppError::Internal("Error creating asset on S3".to_string())
        })?;

    state.registry.insert_pending(id.clone(), upload_url.clone());
    tracing::info!("📦 Asset {} created, awaiting upload", id);

    Ok(Json(CreateAssetResponse { upload_url, id }))
}

#[utoipa::path(
    put,
    path = "/asset/{id}",
    request_body = ConfirmUploadRequest,
    params(
        ("id" = String, Path, description = "Asset id returned by create")
    ),
    responses(
        (status = 200, description = "Status accepted", body = ConfirmUploadResponse),
        (status = 400, description = "Missing id, unknown asset, or already uploaded")
    ),
    tag = "assets"
)]
pub async fn confirm_upload(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ConfirmUploadRequest>>,
) -> Result<Json<ConfirmUploadResponse>, AppError> {
    if id.is_empty() {
        return Err(AppError::BadRequest("Missing asset id".to_string()));
    }

    let status = body
        .and_then(|Json(req)| req.status)
        .unwrap_or_default();

    let message = match state.registry.confirm(&id, &status) {
        ConfirmOutcome::Confirmed => {
            tracing::info!("✅ Asset {} upload confirmed", id);
            "Asset is completely uploaded".to_string()
        }
        ConfirmOutcome::AlreadyUploaded => {
            return Err(AppError::BadRequest("Asset is already uploaded".to_string()));
        }
        ConfirmOutcome::NotCreated => {
            return Err(AppError::BadRequest(
                "Asset has not been created yet".to_string(),
            ));
        }
        ConfirmOutcome::StatusNoted(status) => format!("Asset status is set as: {}", status),
    };

    Ok(Json(ConfirmUploadResponse { message }))
}

#[utoipa::path(
    get,
    path = "/asset/{id}",
    params(
        ("id" = String, Path, description = "Asset id returned by create"),
        ("timeout" = Option<u64>, Query, description = "Download URL lifetime in seconds (default 60)")
    ),
    responses(
        (status = 200, description = "Signed download URL issued", body = DownloadAssetResponse),
        (status = 400, description = "Missing id or asset not confirmed yet"),
        (status = 500, description = "Storage provider failed to sign the URL")
    ),
    tag = "assets"
)]
pub async fn download_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadAssetResponse>, AppError> {
    if id.is_empty() {
        return Err(AppError::BadRequest("Missing asset id".to_string()));
    }

    if !state.registry.is_confirmed(&id) {
        return Err(AppError::BadRequest(
            "Only complete assets are allowed to be fetched".to_string(),
        ));
    }

    let timeout = resolve_timeout(query.timeout.as_deref());
    let download_url = state
        .storage
        .issue_download_url(&id, timeout)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue download URL for asset {}: {:?}", id, e);
            AppError::Internal("Error getting signed URL for asset download".to_string())
        })?;

    Ok(Json(DownloadAssetResponse { download_url }))
}

/// `PUT /asset` and `GET /asset` without an id segment. The id is part of the
/// path, so these only ever mean a malformed client request.
pub async fn missing_asset_id() -> AppError {
    AppError::BadRequest("Missing asset id".to_string())
}

#[cfg(test)]
mod tests {
    use super::resolve_timeout;

    #[test]
    fn timeout_defaults_to_sixty() {
        assert_eq!(resolve_timeout(None), 60);
        assert_eq!(resolve_timeout(Some("")), 60);
        assert_eq!(resolve_timeout(Some("abc")), 60);
        assert_eq!(resolve_timeout(Some("-5")), 60);
        assert_eq!(resolve_timeout(Some("0")), 60);
    }

    #[test]
    fn numeric_timeout_is_used_as_is() {
        assert_eq!(resolve_timeout(Some("2")), 2);
        assert_eq!(resolve_timeout(Some("3600")), 3600);
    }
}
