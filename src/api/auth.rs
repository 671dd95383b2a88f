use actix_web::{web, HttpResponse, ResponseError};

use crate::database::MongoDB;
use crate::models::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::services::mail_service::ResendMailer;
use crate::services::otp_service;

#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    tag = "Auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 201, description = "Recovery code generated and mailed"),
        (status = 404, description = "No account for that email"),
        (status = 500, description = "Email delivery failed")
    )
)]
pub async fn forgot_password(
    db: web::Data<MongoDB>,
    mailer: web::Data<ResendMailer>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse {
    log::info!("🔑 POST /auth/forgot-password - email: {}", request.email);

    match otp_service::issue_recovery_code(&db, mailer.get_ref(), &request.email).await {
        Ok(_) => {
            log::info!("✅ Recovery code sent: {}", request.email);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "message": "OTP successfully sent. Check your mail inbox"
            }))
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-otp",
    tag = "Auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 201, description = "Fresh code generated and mailed, replacing the old one"),
        (status = 404, description = "No account for that email"),
        (status = 500, description = "Email delivery failed")
    )
)]
pub async fn resend_otp(
    db: web::Data<MongoDB>,
    mailer: web::Data<ResendMailer>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse {
    log::info!("🔁 POST /auth/resend-otp - email: {}", request.email);

    match otp_service::issue_recovery_code(&db, mailer.get_ref(), &request.email).await {
        Ok(_) => {
            log::info!("✅ Recovery code re-sent: {}", request.email);
            HttpResponse::Created().json(serde_json::json!({
                "success": true,
                "message": "OTP successfully sent. Check your mail inbox"
            }))
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced, code consumed"),
        (status = 400, description = "Invalid or expired code"),
        (status = 404, description = "No account for that email")
    )
)]
pub async fn reset_password(
    db: web::Data<MongoDB>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /auth/reset-password - email: {}", request.email);

    match otp_service::reset_password(&db, &request).await {
        Ok(_) => {
            log::info!("✅ Password reset: {}", request.email);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Password reset successfully"
            }))
        }
        Err(e) => e.error_response(),
    }
}
