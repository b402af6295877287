use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;

use crate::dto::ErrorResponse;

/// JSON body extractor that never rejects on content.
///
/// A malformed, empty, or wrongly-typed body yields `T::default()`, so
/// handlers see the same empty fields as for a body that omits them. No
/// `Content-Type` check is made. Only a failure to read the body itself
/// (for example, exceeding the body limit) is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            let body = ErrorResponse {
                message: rejection.body_text(),
            };
            (rejection.status(), axum::Json(body)).into_response()
        })?;

        let value = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::debug!("Unparseable JSON body treated as empty: {e}");
            T::default()
        });

        Ok(Self(value))
    }
}
