use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account document in the "users" collection.
///
/// Sign-up and sign-in are handled by the web frontend; this service only
/// reads accounts and maintains the password recovery fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub email: String,

    /// bcrypt hash, never sent to clients
    pub password: String,

    /// Pending recovery code, null when none is active
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub forgot_pass_code: Option<String>,

    /// Instant after which the pending code stops being accepted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub forgot_pass_code_expiry: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

/// Request to start password recovery for an account
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request to finish password recovery with the mailed code
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}
