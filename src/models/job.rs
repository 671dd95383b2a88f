use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Job posting document in the "jobs" collection.
///
/// Postings are written by the placement-cell admin tooling; this service
/// only reads them, so optional fields deserialize leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,

    /// Denormalized company name for listings
    pub company_name: String,

    pub company_id: ObjectId,

    /// Work arrangement: "onsite", "remote" or "hybrid"
    pub mode: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub salary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deadline: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime>,
}

/// Job posting as rendered in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub company_id: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: job.title,
            company_name: job.company_name,
            company_id: job.company_id.to_hex(),
            mode: job.mode,
            description: job.description,
            location: job.location,
            salary: job.salary,
            deadline: job.deadline.map(super::rfc3339),
            created_at: job.created_at.map(super::rfc3339),
            updated_at: job.updated_at.map(super::rfc3339),
        }
    }
}
