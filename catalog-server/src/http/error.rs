//! Mapping from service errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::ServiceError;

/// An error response carrying an HTTP status and a `detail` message body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) | ServiceError::EmptyQuery => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::SearchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_search::SearchError;
    use catalog_shared::ValidationError;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::from(ServiceError::Validation(ValidationError::EmptyName));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(ServiceError::NotFound(3));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.detail.contains('3'));
    }

    #[test]
    fn test_search_failure_maps_to_503() {
        let err = ApiError::from(ServiceError::SearchUnavailable(SearchError::query("down")));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
