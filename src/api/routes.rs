use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{self, AppState};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::categories::list_categories,
        handlers::predict::predict_yield,
    ),
    components(schemas(
        crate::models::PredictionRequest,
        crate::models::PredictionResponse,
        crate::models::HealthResponse,
        crate::models::CategoriesResponse,
        crate::models::CategoryEntry,
        crate::models::ValidationErrorBody,
        crate::models::CategoryErrorBody,
        crate::models::ErrorBody,
        crate::error::FieldViolation,
    )),
    tags(
        (name = "crop-yield", description = "Crop yield prediction API")
    ),
    info(
        title = "Crop Yield Prediction API",
        version = "1.0",
        description = "Predict crop yields from a pre-fitted regression model"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/categories", get(handlers::list_categories))
        .route("/predict", post(handlers::predict_yield))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
