use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Profile document in the "studentprofiles" collection.
///
/// At most one per account, backed by a unique index on `userId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Owning account
    pub user_id: ObjectId,

    /// Contact email, independent of the account email
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,

    pub enrollment_no: String,

    pub branch: String,

    /// Current year of study
    pub year: i32,

    pub cgpa: f64,

    pub resume_url: String,

    pub skills: Vec<String>,

    pub is_placed: bool,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

/// Request to create the caller's profile. Everything except `email`
/// is required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub email: Option<String>,
    pub enrollment_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub cgpa: Option<f64>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// Partial profile update. Absent fields keep their stored values.
///
/// `email` is double-wrapped so an explicit `"email": null` (clear the
/// field) can be told apart from the key being absent (leave it alone).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    pub enrollment_no: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub cgpa: Option<f64>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub is_placed: Option<bool>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Profile as rendered in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub enrollment_no: String,
    pub branch: String,
    pub year: i32,
    pub cgpa: f64,
    pub resume_url: String,
    pub skills: Vec<String>,
    pub is_placed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<StudentProfile> for StudentProfileResponse {
    fn from(profile: StudentProfile) -> Self {
        StudentProfileResponse {
            id: profile.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: profile.user_id.to_hex(),
            email: profile.email,
            enrollment_no: profile.enrollment_no,
            branch: profile.branch,
            year: profile.year,
            cgpa: profile.cgpa,
            resume_url: profile.resume_url,
            skills: profile.skills,
            is_placed: profile.is_placed,
            created_at: super::rfc3339(profile.created_at),
            updated_at: super::rfc3339(profile.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_email_absent() {
        let request: UpdateProfileRequest = serde_json::from_str(r#"{"branch": "CSE"}"#).unwrap();
        assert_eq!(request.email, None);
        assert_eq!(request.branch.as_deref(), Some("CSE"));
    }

    #[test]
    fn test_update_request_email_explicit_null() {
        let request: UpdateProfileRequest = serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert_eq!(request.email, Some(None));
    }

    #[test]
    fn test_update_request_email_present() {
        let request: UpdateProfileRequest =
            serde_json::from_str(r#"{"email": "s@campus.edu"}"#).unwrap();
        assert_eq!(request.email, Some(Some("s@campus.edu".to_string())));
    }

    #[test]
    fn test_profile_document_field_names_are_camel_case() {
        let request: CreateProfileRequest = serde_json::from_str(
            r#"{"enrollmentNo": "EN-42", "branch": "ECE", "year": 3, "cgpa": 8.1,
                "resumeUrl": "https://cdn.example.com/r.pdf", "skills": ["rust"]}"#,
        )
        .unwrap();
        assert_eq!(request.enrollment_no.as_deref(), Some("EN-42"));
        assert_eq!(request.resume_url.as_deref(), Some("https://cdn.example.com/r.pdf"));
    }
}
