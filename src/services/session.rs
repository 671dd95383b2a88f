use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Cookie the web frontend stores the session token under.
pub const SESSION_COOKIE: &str = "session-token";

/// Claims carried by the session token the web frontend issues at sign-in.
///
/// This service only verifies tokens, it never issues one.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id (ObjectId hex)
    pub sub: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub iat: usize,
    pub exp: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jti: Option<String>,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Verifies signature and expiry of a session token.
pub fn verify_session_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthenticated("Not authenticated".to_string()))
}

/// Account id from verified claims as an ObjectId.
pub fn subject_id(claims: &Claims) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthenticated("Invalid session token".to_string()))
}

/// Builds a token the way the frontend does. Test helper only.
#[cfg(test)]
pub fn sign_session_token(claims: &Claims) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .unwrap()
}

#[cfg(test)]
pub fn test_claims(sub: &str, ttl_seconds: i64) -> Claims {
    let now = chrono::Utc::now().timestamp();
    Claims {
        sub: sub.to_string(),
        email: "student@campus.edu".to_string(),
        name: Some("Test Student".to_string()),
        iat: now as usize,
        exp: (now + ttl_seconds) as usize,
        jti: Some(uuid::Uuid::new_v4().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_roundtrip() {
        let claims = test_claims("665f1f77bcf86cd799439011", 3600);
        let token = sign_session_token(&claims);

        let verified = verify_session_token(&token).unwrap();
        assert_eq!(verified.sub, "665f1f77bcf86cd799439011");
        assert_eq!(verified.email, "student@campus.edu");
    }

    #[test]
    fn test_expired_token_rejected() {
        // jsonwebtoken applies 60s leeway, so expire well past it
        let claims = test_claims("665f1f77bcf86cd799439011", -300);
        let token = sign_session_token(&claims);

        assert!(verify_session_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let claims = test_claims("665f1f77bcf86cd799439011", 3600);
        let mut token = sign_session_token(&claims);
        token.push('x');

        assert!(verify_session_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_session_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_subject_id_parses_hex() {
        let claims = test_claims("665f1f77bcf86cd799439011", 3600);
        let oid = subject_id(&claims).unwrap();
        assert_eq!(oid.to_hex(), "665f1f77bcf86cd799439011");
    }

    #[test]
    fn test_subject_id_rejects_malformed() {
        let claims = test_claims("nope", 3600);
        assert!(subject_id(&claims).is_err());
    }
}
