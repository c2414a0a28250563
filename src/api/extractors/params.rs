//! Path and query extractors that reject into the JSON error envelope.

use axum::{
    async_trait,
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequestParts, Path, Query,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Path parameters; a malformed segment becomes `AppError::Validation`.
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(ValidPath(value))
    }
}

/// Query string; unknown enum values and bad types become `AppError::Validation`.
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::validation(e.body_text()))?;
        Ok(ValidQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    use crate::domain::LoanStatus;

    #[derive(Debug, Deserialize)]
    struct StatusQuery {
        status: Option<LoanStatus>,
    }

    fn parts(uri: &str) -> Parts {
        Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_unknown_status_is_validation_error() {
        let result = ValidQuery::<StatusQuery>::from_request_parts(
            &mut parts("/loan-applications?status=approved"),
            &(),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_known_status_parses() {
        let ValidQuery(query) = ValidQuery::<StatusQuery>::from_request_parts(
            &mut parts("/loan-applications?status=rejected"),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(query.status, Some(LoanStatus::Rejected));
    }
}
