use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use tracing::error;

/// Error body returned by every route: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ServiceError::MalformedDocument { .. } => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Malformed Document", detail),
            ServiceError::AlreadyExists(_) => Self::new(StatusCode::CONFLICT, "Already Exists", detail),
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail),
            ServiceError::Io { .. } => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail),
        }
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), "Validation Error", Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (ServiceError::malformed("a", "bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::Io { file: "a".into(), reason: "disk".into() }, StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::AlreadyExists("a".into()), StatusCode::CONFLICT),
            (ServiceError::Validation("bad name".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }
}
