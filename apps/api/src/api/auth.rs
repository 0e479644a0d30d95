use axum::Router;
use domain_users::{AuthState, PgUserRepository, UserService, auth_router};

pub fn router(state: &crate::state::AppState) -> Router {
    // Use PostgreSQL repository with database connection
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    // Create auth state with JWT authentication; cookies are Secure only
    // when serving over HTTPS
    let auth_state = AuthState {
        service,
        jwt_auth: state.jwt_auth.clone(),
        secure_cookies: state.config.environment.use_https(),
    };

    auth_router(auth_state)
}
