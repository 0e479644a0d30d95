//! Extractor for the authenticated caller.

use crate::auth::JwtClaims;
use crate::errors::{ErrorCode, error_response};
use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts, response::Response};
use uuid::Uuid;

/// The authenticated caller, taken from the JWT claims that
/// [`jwt_auth_middleware`](crate::jwt_auth_middleware) stored in request
/// extensions.
///
/// Only usable on routes behind the auth middleware; elsewhere extraction
/// fails with 401.
///
/// # Example
/// ```ignore
/// use axum_helpers::CurrentUser;
///
/// async fn me(user: CurrentUser) -> String {
///     format!("Hello, {}", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<JwtClaims>().ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                ErrorCode::Unauthorized,
            )
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid token subject".to_string(),
                ErrorCode::Unauthorized,
            )
        })?;

        Ok(CurrentUser {
            id,
            email: claims.email.clone(),
            name: claims.name.clone(),
        })
    }
}
