//! Positive integer path parameter.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extracts a single positive `i64` path parameter.
///
/// Non-numeric, zero and negative values are rejected with `400 INVALID_ID`.
///
/// ```ignore
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item {id}")
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl IdPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::InvalidId(format!("Invalid id: {raw}"))),
        }
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Self::parse(&raw).map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_parse_accepts_positive_integers() {
        assert_eq!(IdPath::parse("1").unwrap(), IdPath(1));
        assert_eq!(IdPath::parse("9007199254740993").unwrap().0, 9_007_199_254_740_993);
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        for raw in ["abc", "0", "-4", "1.5", ""] {
            assert!(
                matches!(IdPath::parse(raw), Err(AppError::InvalidId(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_extractor_rejects_with_bad_request() {
        let app = Router::new().route(
            "/items/{id}",
            get(|IdPath(id): IdPath| async move { id.to_string() }),
        );

        let ok = app
            .clone()
            .oneshot(Request::get("/items/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let bad = app
            .oneshot(Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
