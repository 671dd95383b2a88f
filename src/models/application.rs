use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::job::Job;

/// Application lifecycle. Stored lowercase; transitions happen in the
/// recruiter tooling, this service only creates `Applied` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

/// Application document in the "applications" collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Student profile that applied (not the account id)
    pub student_id: ObjectId,

    pub job_id: ObjectId,

    pub status: ApplicationStatus,

    pub applied_at: DateTime,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

/// Request to apply to a job posting
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: String,
}

/// Slice of the job posting embedded in application listings
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub company_id: String,
    pub mode: String,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        JobSummary {
            id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            company_id: job.company_id.to_hex(),
            mode: job.mode.clone(),
        }
    }
}

/// Application entry joined with its job posting.
///
/// `job_id` stays in the payload as `null` when the posting has been
/// removed, so clients can still render the rest of the entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    pub job_id: Option<JobSummary>,
    pub status: ApplicationStatus,
    pub applied_at: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Application as returned right after submission
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    pub job_id: String,
    pub status: ApplicationStatus,
    pub applied_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        ApplicationResponse {
            id: application.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: application.student_id.to_hex(),
            job_id: application.job_id.to_hex(),
            status: application.status,
            applied_at: super::rfc3339(application.applied_at),
        }
    }
}
