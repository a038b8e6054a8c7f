use crate::repository::RepoError;
use crate::validation::FieldErrors;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

#[derive(Debug, Display)]
pub enum ApiError {
    /// 400 with the field map as the body
    #[display(fmt = "invalid input")]
    InvalidInput(FieldErrors),

    /// 400 `{"detail": ...}`
    #[display(fmt = "{}", _0)]
    Conflict(&'static str),

    #[display(fmt = "not found")]
    NotFound,

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "internal server error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Conflict(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::InvalidInput(errors) => builder.json(errors),
            ApiError::Conflict(detail) => builder.json(json!({ "detail": detail })),
            ApiError::NotFound => builder.json(json!({ "detail": "Not found." })),
            ApiError::BadRequest(detail) => builder.json(json!({ "detail": detail })),
            ApiError::Internal => builder.json(json!({ "detail": "Internal server error." })),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::InvalidInput(errors)
    }
}

/// Handlers map `RepoError::Conflict` themselves to pick the message.
impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound,
            RepoError::Conflict => ApiError::Conflict("Record already exists."),
            RepoError::Database(e) => {
                error!(error = %e, "Database error");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn invalid_input_renders_field_map() {
        let mut errors = FieldErrors::default();
        errors.add("email", "Enter a valid email address.");

        let (status, body) = body_json(ApiError::InvalidInput(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"email": ["Enter a valid email address."]}));
    }

    #[actix_web::test]
    async fn conflict_renders_detail() {
        let (status, body) = body_json(ApiError::Conflict("Attendance already marked for this date.")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Attendance already marked for this date."}));
    }

    #[actix_web::test]
    async fn repo_errors_map_to_http() {
        let (status, _) = body_json(RepoError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = body_json(RepoError::Database(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error."}));
    }
}
