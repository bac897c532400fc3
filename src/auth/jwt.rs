// JWT token creation and verification
// Session tokens carry the user id and role, with an 8-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Role;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `role` - Role the session acts with
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: Uuid,
    pub role: Role,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a session token for a user
///
/// Tokens are issued by the sign-in service; this is used by tooling and
/// tests.
///
/// # Example
/// ```
/// use coursework_teams_api::auth::jwt::create_token;
/// use coursework_teams_api::domain::user::Role;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), Role::Instructor, "your-secret-key")
///     .expect("valid token");
/// assert!(!token.is_empty());
/// ```
pub fn create_token(user_id: Uuid, role: Role, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(8);
    let claims = Claims {
        sub: user_id,
        role,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a session token
///
/// # Returns
/// * `Ok(Claims)` - The decoded claims if token is valid
/// * `Err(String)` - If token is invalid or expired
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
