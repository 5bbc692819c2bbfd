//! JSON HTTP handlers. Every failure is answered with `{"error": "<message>"}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get};
use serde::Serialize;

use crate::services::ServiceError;

pub mod inventory;
pub mod sales;
pub mod shows;
pub mod tours;
pub mod users;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build a JSON error response with the given status.
pub fn error_json(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: message.into(),
    })
}

/// Translate a service failure into its HTTP response. Internal details are
/// logged under `action` and never sent to the client.
pub fn service_error_response(action: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Form(message) => error_json(StatusCode::BAD_REQUEST, message),
        ServiceError::InsufficientStock(message) => {
            log::info!("{action} rejected: {message}");
            error_json(StatusCode::BAD_REQUEST, "Insufficient inventory")
        }
        ServiceError::NotFound => error_json(StatusCode::NOT_FOUND, "Not found"),
        ServiceError::Conflict(message) => error_json(StatusCode::CONFLICT, message),
        ServiceError::Unauthorized => error_json(StatusCode::FORBIDDEN, "Unauthorized"),
        ServiceError::Forbidden => error_json(StatusCode::FORBIDDEN, "Forbidden"),
        ServiceError::InvalidCredentials => {
            error_json(StatusCode::UNAUTHORIZED, "Invalid credentials")
        }
        ServiceError::Internal(detail) => {
            log::error!("Failed to {action}: {detail}");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

#[get("/")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Merch tracker API is running")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[actix_web::test]
    async fn stock_shortfall_is_a_bad_request() {
        let response = service_error_response(
            "record sale",
            ServiceError::InsufficientStock("Insufficient inventory for item 4".to_string()),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["error"], "Insufficient inventory");
    }

    #[actix_web::test]
    async fn internal_details_are_hidden() {
        let response = service_error_response(
            "close show",
            ServiceError::Internal("database is locked".to_string()),
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["error"], "Internal server error");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Conflict("taken".into()), StatusCode::CONFLICT),
            (ServiceError::Unauthorized, StatusCode::FORBIDDEN),
            (ServiceError::Forbidden, StatusCode::FORBIDDEN),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ServiceError::Form("bad".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(service_error_response("test", err).status(), status);
        }
    }
}
