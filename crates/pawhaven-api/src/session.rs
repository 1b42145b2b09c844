use axum::Router;
use pawhaven_types::models::SessionUser;
use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    Expiry, MemoryStore, Session, SessionManagerLayer,
    cookie::{Key, SameSite},
};

use crate::error::ApiError;

/// Session data key holding the logged-in [`SessionUser`].
pub const SESSION_USER_KEY: &str = "user";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signs the session cookie. Any length; stretched to a 64-byte key.
    pub secret: String,
    pub cookie_name: String,
    /// Sessions expire after this many seconds without a request.
    pub ttl_secs: i64,
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "secret-key".into(),
            cookie_name: "pawhaven.sid".into(),
            ttl_secs: 24 * 60 * 60,
            secure: false,
        }
    }
}

impl SessionConfig {
    fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

/// Wrap `router` in an in-memory, signed-cookie session layer. Sessions are
/// only written to the store once a handler modifies them.
pub fn with_sessions(router: Router, config: &SessionConfig) -> Router {
    let layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(config.ttl_secs)))
        .with_signed(config.signing_key());

    router.layer(layer)
}

/// The user stored by a successful login, if any.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, ApiError> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(ApiError::session("Error reading session"))
}
