use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::service::{DocumentRequest, LendingWizardService, WizardServiceError};
use crate::workflows::catalog::CatalogProvider;
use crate::workflows::documents::UploadedFile;
use crate::workflows::recommendation::FundingProfile;

/// Router builder exposing the catalog, recommendation, and document endpoints.
pub fn wizard_router<C>(service: Arc<LendingWizardService<C>>) -> Router
where
    C: CatalogProvider + 'static,
{
    Router::new()
        .route("/api/public/lenders", get(lenders_handler::<C>))
        .route("/api/v1/recommendations", post(recommend_handler::<C>))
        .route(
            "/api/v1/documents/requirements",
            post(requirements_handler::<C>),
        )
        .route("/api/v1/documents/validate", post(validate_handler::<C>))
        .with_state(service)
}

pub(crate) async fn lenders_handler<C>(
    State(service): State<Arc<LendingWizardService<C>>>,
) -> Response
where
    C: CatalogProvider + 'static,
{
    match service.lenders() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn recommend_handler<C>(
    State(service): State<Arc<LendingWizardService<C>>>,
    axum::Json(profile): axum::Json<FundingProfile>,
) -> Response
where
    C: CatalogProvider + 'static,
{
    match service.recommend(&profile) {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn requirements_handler<C>(
    State(service): State<Arc<LendingWizardService<C>>>,
    axum::Json(request): axum::Json<DocumentRequest>,
) -> Response
where
    C: CatalogProvider + 'static,
{
    match service.required_documents(&request) {
        Ok(resolution) => (StatusCode::OK, axum::Json(resolution)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn validate_handler<C>(
    State(service): State<Arc<LendingWizardService<C>>>,
    axum::Json(files): axum::Json<Vec<UploadedFile>>,
) -> Response
where
    C: CatalogProvider + 'static,
{
    let validation = service.validate_documents(&files);
    (StatusCode::OK, axum::Json(validation)).into_response()
}

fn service_error(error: WizardServiceError) -> Response {
    let status = match error {
        WizardServiceError::Catalog(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
