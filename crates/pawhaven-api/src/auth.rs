use std::sync::Arc;

use axum::{extract::State, response::Redirect};
use tower_sessions::Session;
use tracing::{debug, info, warn};

use pawhaven_db::Database;
use pawhaven_types::models::SessionUser;

use crate::blocking;
use crate::error::ApiError;
use crate::extract::CredentialsBody;
use crate::password::Hasher;
use crate::session::{SESSION_USER_KEY, current_user};

pub const LOGIN_PAGE: &str = "/login.html";
pub const USER_PAGE: &str = "/user.html";

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub hasher: Hasher,
}

pub async fn register(
    State(state): State<AppState>,
    CredentialsBody(req): CredentialsBody,
) -> Result<Redirect, ApiError> {
    let password_hash = state
        .hasher
        .hash(req.password)
        .await
        .map_err(ApiError::hashing("Error hashing password"))?;

    let db = state.clone();
    let email = req.email;
    let user_id = blocking(move || db.db.create_user(&email, &password_hash))
        .await
        .map_err(ApiError::persistence("Error saving user"))?
        .ok_or(ApiError::EmailTaken)?;

    info!(user_id, "User registered");
    Ok(Redirect::to(LOGIN_PAGE))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    CredentialsBody(req): CredentialsBody,
) -> Result<Redirect, ApiError> {
    let db = state.clone();
    let email = req.email.clone();
    let user = blocking(move || db.db.get_user_by_email(&email))
        .await
        .map_err(ApiError::persistence("Database error"))?;

    let Some(user) = user else {
        // Same Argon2 cost as a wrong password, so timing does not reveal accounts
        let _ = state.hasher.verify_missing_user(req.password).await;
        debug!("Login for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let matched = state
        .hasher
        .verify(req.password, user.password)
        .await
        .map_err(ApiError::hashing("Error comparing passwords"))?;

    if !matched {
        debug!(user_id = user.id, "Password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    // Fresh session id on every login
    session
        .cycle_id()
        .await
        .map_err(ApiError::session("Error creating session"))?;
    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                user_id: user.id,
                email: user.email,
            },
        )
        .await
        .map_err(ApiError::session("Error creating session"))?;

    info!(user_id = user.id, "User logged in");
    Ok(Redirect::to(USER_PAGE))
}

/// Destroys the session whether or not anyone is logged in.
pub async fn logout(session: Session) -> Result<&'static str, ApiError> {
    match current_user(&session).await {
        Ok(Some(user)) => info!(user_id = user.user_id, "User logged out"),
        Ok(None) => debug!("Logout without an active login"),
        Err(e) => warn!("Could not read session before logout: {:?}", e),
    }

    session
        .flush()
        .await
        .map_err(ApiError::session("Error logging out"))?;

    Ok("Logged out successfully!")
}
