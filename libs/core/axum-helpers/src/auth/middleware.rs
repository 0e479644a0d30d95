use super::cookies::{ACCESS_TOKEN_COOKIE, cookie_value};
use super::jwt::JwtAuth;
use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // "Bearer <token>" wins over the cookie when both are present
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| cookie_value(headers, ACCESS_TOKEN_COOKIE))
}

/// JWT authentication middleware.
///
/// Validates access tokens from the Authorization header or the
/// `access_token` cookie: the signature and expiry must check out, and the
/// token must be of the access kind. Refresh tokens are rejected here so a
/// long-lived token leaking from the refresh endpoint cannot authenticate
/// requests. On success the decoded [`JwtClaims`](super::JwtClaims) are
/// inserted into request extensions for the [`CurrentUser`](crate::CurrentUser)
/// extractor.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::{JwtAuth, jwt_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = extract_token_from_request(&headers) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Authentication required".to_string(),
            ErrorCode::Unauthorized,
        ));
    };

    let claims = match auth.verify_access_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
                ErrorCode::Unauthorized,
            ));
        }
    };

    // Token is valid - insert claims into request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
