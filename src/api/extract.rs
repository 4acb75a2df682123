//! Lenient request body extraction
//!
//! USSD gateways post `application/x-www-form-urlencoded`; JSON is accepted
//! too. A body that cannot be parsed is logged and treated as an empty
//! request, because the gateway has no way to recover from an HTTP error
//! mid-dialog.

use crate::dialog::DialogRequest;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use std::convert::Infallible;

/// Gateway request parsed from form or JSON
#[derive(Debug, Clone, Default)]
pub struct UssdForm(pub DialogRequest);

#[async_trait]
impl<S> FromRequest<S> for UssdForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let parsed = if is_json {
            Json::<DialogRequest>::from_request(req, state)
                .await
                .map(|Json(r)| r)
                .map_err(|e| e.body_text())
        } else {
            Form::<DialogRequest>::from_request(req, state)
                .await
                .map(|Form(r)| r)
                .map_err(|e| e.body_text())
        };

        Ok(Self(parsed.unwrap_or_else(|error| {
            tracing::warn!(%error, "Malformed USSD request body, treating as empty");
            DialogRequest::default()
        })))
    }
}
