use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Unauthenticated(String),
    NotFound(String),
    ValidationError(String),
    Conflict(String),
    DeliveryFailure(String),
    DatabaseError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DeliveryFailure(msg) => write!(f, "Delivery failure: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DeliveryFailure(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Database and internal details never reach the client body.
        let message = match self {
            AppError::Unauthenticated(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => {
                log::warn!("⚠️ Validation error: {}", msg);
                msg.clone()
            }
            AppError::Conflict(msg) => {
                log::warn!("⚠️ Conflict: {}", msg);
                msg.clone()
            }
            AppError::DeliveryFailure(msg) => {
                log::error!("❌ Mail delivery failure: {}", msg);
                msg.clone()
            }
            AppError::DatabaseError(msg) => {
                log::error!("❌ Database error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::InternalError(msg) => {
                log::error!("❌ Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message
        }))
    }
}
