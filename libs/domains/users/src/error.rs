use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Email already in use")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Refresh token is required")]
    MissingRefreshToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::EmailTaken => AppError::BadRequest("Email already in use".to_string()),
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::MissingRefreshToken => {
                AppError::BadRequest("Refresh token is required".to_string())
            }
            UserError::InvalidRefreshToken => {
                AppError::Forbidden("Invalid refresh token".to_string())
            }
            UserError::Unauthorized => AppError::Unauthorized("Authentication required".to_string()),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(e) => AppError::Database(e),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn error_status_codes_match_contract() {
        let cases = [
            (UserError::NotFound(Uuid::now_v7()), StatusCode::NOT_FOUND),
            (UserError::EmailTaken, StatusCode::BAD_REQUEST),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::MissingRefreshToken, StatusCode::BAD_REQUEST),
            (UserError::InvalidRefreshToken, StatusCode::FORBIDDEN),
            (UserError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                UserError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
