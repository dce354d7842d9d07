use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    JWT(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    // Error bodies are `{"msg": ...}` with the underlying message surfaced
    // as-is, including for storage failures.
    pub fn to_http_response(&self) -> HttpResponse {
        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "msg": self.to_string() }))
            }
            AppError::JWT(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "msg": self.to_string() }))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => {
                HttpResponse::Unauthorized().json(serde_json::json!({ "msg": self.to_string() }))
            }
            AppError::Forbidden(_) => {
                HttpResponse::Forbidden().json(serde_json::json!({ "msg": self.to_string() }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "msg": self.to_string() }))
            }
            AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "msg": self.to_string() }))
            }

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "msg": self.to_string() }))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized("no token".to_string()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::Forbidden("not yours".to_string()), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound("Customer not found".to_string()), StatusCode::NOT_FOUND)]
    #[case(AppError::BadRequest("bad status".to_string()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_variants_to_statuses(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.to_http_response().status(), expected);
    }

    #[actix_web::test]
    async fn body_carries_the_message_under_msg() {
        let response = AppError::NotFound("Lead not found".to_string()).to_http_response();
        let bytes = to_bytes(response.into_body()).await.expect("body to bytes");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body, serde_json::json!({ "msg": "Lead not found" }));
    }

    #[actix_web::test]
    async fn database_errors_surface_their_message() {
        let response = AppError::from(sqlx::Error::PoolTimedOut).to_http_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body()).await.expect("body to bytes");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(
            body["msg"]
                .as_str()
                .expect("msg is a string")
                .starts_with("Database error:")
        );
    }
}
