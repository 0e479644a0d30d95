use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied).
/// Only Arc pointer clones remain when domains extract db connections (cheap).
///
/// Auth routes stay public; user and task routes sit behind the JWT
/// middleware, which rejects requests without a valid access token.
pub fn routes(state: &crate::state::AppState) -> Router {
    let require_auth =
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware);

    Router::new()
        .nest("/auth", auth::router(state)) // Auth routes at /api/auth
        .nest("/users", users::router(state).layer(require_auth.clone()))
        .nest("/tasks", tasks::router(state).layer(require_auth))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`. The /ready endpoint checks the database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
