use crate::api::errors::ApiError;

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Landing page for sessions refused by the authorization gate
///
/// GET /denied
pub async fn denied() -> ApiError {
    ApiError::forbidden("You are not allowed to manage teams")
}
