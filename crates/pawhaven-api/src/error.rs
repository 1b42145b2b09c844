use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Every way a request can fail. Server-side failures carry the short message
/// sent to the client plus the underlying cause, which is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Unknown email and wrong password share this variant so the response
    /// does not reveal which accounts exist.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("{message}")]
    Hashing {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{message}")]
    Persistence {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{message}")]
    Session {
        message: &'static str,
        #[source]
        source: tower_sessions::session::Error,
    },
}

impl ApiError {
    pub fn hashing(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Hashing { message, source }
    }

    pub fn persistence(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Persistence { message, source }
    }

    pub fn session(message: &'static str) -> impl FnOnce(tower_sessions::session::Error) -> Self {
        move |source| Self::Session { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Hashing { .. } | Self::Persistence { .. } | Self::Session { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Hashing { message, source } | Self::Persistence { message, source } => {
                error!("{}: {:#}", message, source);
            }
            Self::Session { message, source } => {
                error!("{}: {}", message, source);
            }
            _ => {}
        }

        (self.status(), self.to_string()).into_response()
    }
}
