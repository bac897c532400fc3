use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::redirect::redirect;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;
use crate::domain::user::{action_allowed, Role};

/// Where sessions failing the authorization gate are sent
pub const DENIED_PATH: &str = "/denied";

/// Authenticated session taken from the bearer token
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(session: Session) -> String {
///     format!("Hello user {}", session.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        // Extract bearer token
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let claims = verify_token(token, &state.jwt_secret)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(Session {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Session that passed the team management authorization gate
///
/// Extracting it before any other input means a denied request never
/// reaches the service.
#[derive(Debug, Clone, Copy)]
pub struct TeamStaff(pub Session);

/// Why a request did not get a [`TeamStaff`]
#[derive(Debug)]
pub enum AuthRejection {
    /// No usable token
    Unauthenticated(ApiError),
    /// Valid session without teaching-assistant privileges
    Denied,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated(error) => error.into_response(),
            AuthRejection::Denied => redirect(DENIED_PATH, None),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for TeamStaff {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(AuthRejection::Unauthenticated)?;

        if !action_allowed(session.role) {
            tracing::warn!(
                user_id = %session.user_id,
                role = %session.role,
                path = %parts.uri.path(),
                "team action denied"
            );
            return Err(AuthRejection::Denied);
        }

        Ok(TeamStaff(session))
    }
}
