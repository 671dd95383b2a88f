use mongodb::bson::{doc, Bson, DateTime};

use crate::database::MongoDB;
use crate::models::{ResetPasswordRequest, User};
use crate::services::mail_service::MailSender;
use crate::utils::error::AppError;
use crate::utils::otp::{generate_otp, OTP_TTL_SECONDS};

// ==================== Password Recovery ====================

/// Issues a recovery code for the account behind `email` and mails it.
///
/// Reissuing overwrites any pending code, so only the newest one is ever
/// accepted. The code itself never leaves the email channel.
pub async fn issue_recovery_code(
    db: &MongoDB,
    mailer: &dyn MailSender,
    email: &str,
) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::ValidationError("Email is required".to_string()));
    }

    let collection = db.collection::<User>("users");

    // 1. Look up the account
    let user = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // 2. Generate and persist the code before anything is sent
    let code = generate_otp();
    let expiry = DateTime::from_chrono(chrono::Utc::now() + chrono::Duration::seconds(OTP_TTL_SECONDS));

    collection
        .update_one(
            doc! { "email": email },
            doc! {
                "$set": {
                    "forgotPassCode": &code,
                    "forgotPassCodeExpiry": expiry,
                    "updatedAt": DateTime::now(),
                }
            },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    log::info!("🔑 Recovery code issued for {}", email);

    // 3. Dispatch the email; a stored-but-unmailed code is harmless and
    //    gets overwritten on the next request
    let sent = mailer
        .send_forgot_pass_email(email, &user.name, &code)
        .await;

    if !sent.success {
        return Err(AppError::DeliveryFailure(sent.message));
    }

    Ok(())
}

/// Outcome of checking a submitted code against the stored state.
#[derive(Debug, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Invalid,
    Expired,
}

/// Pure decision: a wrong or absent code is Invalid regardless of expiry;
/// the right code at or past its expiry instant is Expired.
pub fn check_code(
    stored: Option<&str>,
    expiry: Option<DateTime>,
    submitted: &str,
    now: DateTime,
) -> OtpCheck {
    match (stored, expiry) {
        (Some(code), Some(expiry)) => {
            if code != submitted {
                OtpCheck::Invalid
            } else if now >= expiry {
                OtpCheck::Expired
            } else {
                OtpCheck::Valid
            }
        }
        _ => OtpCheck::Invalid,
    }
}

/// Verifies the mailed code and sets the new password.
///
/// The consume step re-checks code and expiry inside a single conditional
/// update, so two concurrent requests with the same code cannot both
/// succeed: whoever loses sees zero modified documents.
pub async fn reset_password(db: &MongoDB, request: &ResetPasswordRequest) -> Result<(), AppError> {
    // 1. Validate input
    if request.email.trim().is_empty()
        || request.code.trim().is_empty()
        || request.new_password.is_empty()
    {
        return Err(AppError::ValidationError(
            "Missing required fields".to_string(),
        ));
    }

    let collection = db.collection::<User>("users");

    // 2. Look up the account
    let user = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // 3. Check the submitted code so the caller gets a precise failure
    match check_code(
        user.forgot_pass_code.as_deref(),
        user.forgot_pass_code_expiry,
        &request.code,
        DateTime::now(),
    ) {
        OtpCheck::Invalid => {
            return Err(AppError::ValidationError("Invalid OTP".to_string()));
        }
        OtpCheck::Expired => {
            return Err(AppError::ValidationError(
                "OTP has expired. Please request a new one".to_string(),
            ));
        }
        OtpCheck::Valid => {}
    }

    // 4. Hash the replacement password
    let password_hash = bcrypt::hash(&request.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    // 5. Consume the code: match it and its validity window again in the
    //    filter, clear both fields and install the new password atomically
    let result = collection
        .update_one(
            doc! {
                "email": &request.email,
                "forgotPassCode": &request.code,
                "forgotPassCodeExpiry": { "$gt": DateTime::now() },
            },
            doc! {
                "$set": {
                    "password": password_hash,
                    "forgotPassCode": Bson::Null,
                    "forgotPassCodeExpiry": Bson::Null,
                    "updatedAt": DateTime::now(),
                }
            },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.modified_count == 0 {
        // Raced against another verification or a fresh reissue
        return Err(AppError::ValidationError("Invalid OTP".to_string()));
    }

    log::info!("✅ Password reset completed for {}", request.email);

    Ok(())
}
