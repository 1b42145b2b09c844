use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::auth::{self, AppState};
use crate::pets;
use crate::session::{SessionConfig, with_sessions};

pub async fn home() -> &'static str {
    "Welcome to the Pet Adoption Website!"
}

/// API routes without state, static fallback or session layer.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/pets", get(pets::list_pets))
        .route("/pets/{pet_id}", get(pets::get_pet))
}

/// The complete application: `routes` (normally [`routes()`]), static files
/// from `static_dir` for every other path, and cookie sessions.
pub fn app(
    routes: Router<AppState>,
    state: AppState,
    sessions: &SessionConfig,
    static_dir: &Path,
) -> Router {
    let router = routes
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state);

    with_sessions(router, sessions)
}
