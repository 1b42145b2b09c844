use std::fmt;

use serde::Deserialize;

// -- Auth --

/// Body of `POST /register` and `POST /login`, sent either as JSON or as an
/// URL-encoded form.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Keep plaintext passwords out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
