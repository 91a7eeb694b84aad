//! Request extractors that reject with [`AppError`].

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body decoded into `T`.
///
/// Unlike [`axum::Json`], every decode failure (missing content type,
/// malformed syntax, missing field, wrong field type) is reported as
/// [`AppError::Validation`], i.e. `400 Bad Request`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
        count: i32,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn decodes_well_formed_body() {
        let JsonBody(payload) =
            JsonBody::<Payload>::from_request(json_request(r#"{"name":"a","count":2}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.name, "a");
        assert_eq!(payload.count, 2);
    }

    #[tokio::test]
    async fn wrong_field_type_is_validation_error() {
        let err = JsonBody::<Payload>::from_request(json_request(r#"{"name":"a","count":"two"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn missing_content_type_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"a","count":2}"#))
            .unwrap();
        let err = JsonBody::<Payload>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
