use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use pawhaven_types::api::Credentials;

use crate::error::ApiError;

/// `{email, password}` from either a JSON body or an HTML form post,
/// picked by `Content-Type`. Anything malformed is a 400.
pub struct CredentialsBody(pub Credentials);

impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let credentials = if is_json {
            let Json(credentials) = Json::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            credentials
        } else {
            let Form(credentials) = Form::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            credentials
        };

        Ok(Self(credentials))
    }
}
