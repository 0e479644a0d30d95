use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    ACCESS_TOKEN_COOKIE, JwtAuth, REFRESH_TOKEN_COOKIE, ValidatedJson, auth_cookie,
    clear_auth_cookie, cookie_value,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserError;
use crate::models::{LoginRequest, RefreshRequest, RegisterRequest, TokenPair, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI tag for authentication endpoints
pub const AUTH_TAG: &str = "auth";

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh, logout, me),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            TokenPair,
            UserResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Authentication endpoints")
    )
)]
pub struct AuthApiDoc;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
    /// Set the Secure attribute on auth cookies (off in development)
    pub secure_cookies: bool,
}

// Manual impl: the derive would require `R: Clone`, which the handlers don't bound
impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
            secure_cookies: self.secure_cookies,
        }
    }
}

/// Create the auth router with all HTTP endpoints
pub fn auth_router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(state)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UserError> {
    let user = state.service.register(input).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email/password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; token pair set as cookies", body = TokenPair),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Response, UserError> {
    let user = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    issue_token_pair(&state, &user)
}

/// Exchange a refresh token for a fresh token pair.
///
/// The refresh token is read from the request body when present, falling
/// back to the refresh cookie. Both tokens are rotated on success.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = TokenPair),
        (status = 400, description = "Refresh token is required"),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<Response, UserError> {
    let token = body
        .and_then(|Json(input)| input.refresh_token)
        .or_else(|| cookie_value(&headers, REFRESH_TOKEN_COOKIE))
        .ok_or(UserError::MissingRefreshToken)?;

    let claims = state
        .jwt_auth
        .verify_refresh_token(&token)
        .map_err(|_| UserError::InvalidRefreshToken)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| UserError::InvalidRefreshToken)?;

    // The account may have been deleted since the token was issued
    let user = state.service.get_user(user_id).await.map_err(|e| match e {
        UserError::NotFound(_) => UserError::InvalidRefreshToken,
        other => other,
    })?;

    tracing::debug!(user_id = %user.id, "Rotated token pair");

    issue_token_pair(&state, &user)
}

/// Logout by expiring both auth cookies.
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// access token stays valid until its short TTL runs out.
#[utoipa::path(
    post,
    path = "/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Auth cookies cleared"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn logout<R: UserRepository>(
    State(state): State<AuthState<R>>,
) -> Result<Response, UserError> {
    let clear_access = clear_auth_cookie(ACCESS_TOKEN_COOKIE, state.secure_cookies)
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;
    let clear_refresh = clear_auth_cookie(REFRESH_TOKEN_COOKIE, state.secure_cookies)
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, clear_access),
            (header::SET_COOKIE, clear_refresh),
        ]),
        StatusCode::NO_CONTENT,
    )
        .into_response())
}

/// Get the current user from the access token
#[utoipa::path(
    get,
    path = "/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, UserError> {
    let token = extract_token(&headers).ok_or(UserError::Unauthorized)?;

    let claims = state
        .jwt_auth
        .verify_access_token(&token)
        .map_err(|_| UserError::Unauthorized)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| UserError::Unauthorized)?;

    let user = state.service.get_user(user_id).await?;

    Ok(Json(user))
}

/// Mint a token pair for the user and attach both Set-Cookie headers
fn issue_token_pair<R: UserRepository>(
    state: &AuthState<R>,
    user: &UserResponse,
) -> Result<Response, UserError> {
    let user_id = user.id.to_string();

    let access_token = state
        .jwt_auth
        .create_access_token(&user_id, &user.email, &user.name)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    let refresh_token = state
        .jwt_auth
        .create_refresh_token(&user_id, &user.email, &user.name)
        .map_err(|e| {
            tracing::error!("Failed to create refresh token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    let access_cookie = auth_cookie(
        ACCESS_TOKEN_COOKIE,
        &access_token,
        state.jwt_auth.access_ttl(),
        state.secure_cookies,
    )
    .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;

    let refresh_cookie = auth_cookie(
        REFRESH_TOKEN_COOKIE,
        &refresh_token,
        state.jwt_auth.refresh_ttl(),
        state.secure_cookies,
    )
    .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;

    Ok((
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(TokenPair {
            access_token,
            refresh_token,
        }),
    )
        .into_response())
}

/// Extract the access token from the Authorization header or cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| cookie_value(headers, ACCESS_TOKEN_COOKIE))
}
