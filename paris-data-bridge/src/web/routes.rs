//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{GetAllDestinationsResponse, TransportType};

use super::dto::ErrorResponse;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/paris-data/destinations/:type/:line",
            get(get_all_destinations),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up the destinations of a line and republish them.
///
/// Answers 200 whether or not the upstream call succeeded; on failure the
/// body is `null`. Either way the outcome goes out on the message bus.
async fn get_all_destinations(
    State(state): State<AppState>,
    Path((transport_type, line)): Path<(String, String)>,
) -> Result<Json<Option<GetAllDestinationsResponse>>, AppError> {
    let transport_type =
        TransportType::parse(&transport_type).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    if line.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "line ID must not be empty".to_string(),
        });
    }

    // The client has already logged the failure
    let response = state
        .ratp
        .fetch_destinations(transport_type, &line)
        .await
        .ok();

    debug!(
        %transport_type,
        %line,
        found = response.is_some(),
        "publishing destinations"
    );

    if let Err(e) = state.publisher.publish(response.as_ref()).await {
        warn!(error = %e, %transport_type, %line, "failed to publish destinations");
    }

    Ok(Json(response))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
