pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;

use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::services::registry::AssetRegistry;
use crate::services::storage::StorageService;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::assets::create_asset,
        api::handlers::assets::confirm_upload,
        api::handlers::assets::download_asset,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::assets::CreateAssetResponse,
            api::handlers::assets::ConfirmUploadRequest,
            api::handlers::assets::ConfirmUploadResponse,
            api::handlers::assets::DownloadAssetResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "assets", description = "Asset lifecycle and signed URL endpoints"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AssetRegistry>,
    pub storage: Arc<dyn StorageService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        // A bare PUT/GET /asset (no id segment) must answer 400, not 404.
        .route(
            "/asset",
            post(api::handlers::assets::create_asset)
                .put(api::handlers::assets::missing_asset_id)
                .get(api::handlers::assets::missing_asset_id),
        )
        .route(
            "/asset/:id",
            put(api::handlers::assets::confirm_upload)
                .get(api::handlers::assets::download_asset),
        )
        .fallback(route_not_defined)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(state)
}

async fn route_not_defined() -> AppError {
    tracing::warn!("Route not defined");
    AppError::NotFound("Route not defined".to_string())
}
