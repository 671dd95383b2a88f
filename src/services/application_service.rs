use std::collections::{HashMap, HashSet};

use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::database::{is_duplicate_key, MongoDB};
use crate::models::{
    Application, ApplicationStatus, ApplicationWithJob, ApplyRequest, Job, JobSummary,
    StudentProfile,
};
use crate::utils::error::AppError;

const COLLECTION: &str = "applications";

// ==================== Applications ====================

/// Result of listing the caller's applications. `profile_found` lets the
/// handler keep the "no profile yet" hint without turning it into an error.
#[derive(Debug)]
pub struct ApplicationsList {
    pub applications: Vec<ApplicationWithJob>,
    pub profile_found: bool,
}

/// Lists the caller's applications with their job postings embedded.
///
/// An account without a profile has applied to nothing, so it gets an
/// empty list rather than a failure.
pub async fn list_applications(
    db: &MongoDB,
    user_id: &ObjectId,
) -> Result<ApplicationsList, AppError> {
    use futures::stream::StreamExt;

    // 1. Resolve the caller's profile; applications hang off the profile id
    let profiles = db.collection::<StudentProfile>("studentprofiles");
    let profile = profiles
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let profile = match profile {
        Some(profile) => profile,
        None => {
            return Ok(ApplicationsList {
                applications: Vec::new(),
                profile_found: false,
            });
        }
    };

    let student_id = profile.id.ok_or_else(|| {
        AppError::InternalError("Stored profile is missing its id".to_string())
    })?;

    // 2. Fetch applications in stored order
    let applications_coll = db.collection::<Application>(COLLECTION);
    let mut cursor = applications_coll
        .find(doc! { "studentId": student_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut applications: Vec<Application> = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(application) => applications.push(application),
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        }
    }

    // 3. Batch-fetch the referenced jobs in one query
    let mut jobs_map: HashMap<ObjectId, Job> = HashMap::new();
    if !applications.is_empty() {
        let job_ids: Vec<ObjectId> = applications
            .iter()
            .map(|a| a.job_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let jobs_coll = db.collection::<Job>("jobs");
        let mut jobs_cursor = jobs_coll
            .find(doc! { "_id": { "$in": job_ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        while let Some(result) = jobs_cursor.next().await {
            match result {
                Ok(job) => {
                    if let Some(id) = job.id {
                        jobs_map.insert(id, job);
                    }
                }
                Err(e) => return Err(AppError::DatabaseError(e.to_string())),
            }
        }
    }

    // 4. Join; a posting deleted after the application stays as null
    Ok(ApplicationsList {
        applications: join_applications(applications, &jobs_map),
        profile_found: true,
    })
}

/// Pairs each application with its job summary, keeping input order.
fn join_applications(
    applications: Vec<Application>,
    jobs: &HashMap<ObjectId, Job>,
) -> Vec<ApplicationWithJob> {
    applications
        .into_iter()
        .map(|application| ApplicationWithJob {
            id: application.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: application.student_id.to_hex(),
            job_id: jobs.get(&application.job_id).map(JobSummary::from),
            status: application.status,
            applied_at: crate::models::rfc3339(application.applied_at),
            created_at: crate::models::rfc3339(application.created_at),
            updated_at: crate::models::rfc3339(application.updated_at),
        })
        .collect()
}

/// Applies the caller to a job posting.
pub async fn submit_application(
    db: &MongoDB,
    user_id: &ObjectId,
    request: &ApplyRequest,
) -> Result<Application, AppError> {
    // 1. The posting id must at least parse before we touch anything
    let job_id = ObjectId::parse_str(&request.job_id)
        .map_err(|_| AppError::ValidationError("Invalid job id".to_string()))?;

    // 2. Applying requires a profile
    let profiles = db.collection::<StudentProfile>("studentprofiles");
    let profile = profiles
        .find_one(doc! { "userId": user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| {
            AppError::NotFound("Please create your profile before applying".to_string())
        })?;

    let student_id = profile.id.ok_or_else(|| {
        AppError::InternalError("Stored profile is missing its id".to_string())
    })?;

    // 3. And an existing posting
    let jobs = db.collection::<Job>("jobs");
    jobs.find_one(doc! { "_id": job_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    // 4. One application per posting
    let applications = db.collection::<Application>(COLLECTION);
    let existing = applications
        .find_one(doc! { "studentId": student_id, "jobId": job_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let now = DateTime::now();
    let mut application = Application {
        id: None,
        student_id,
        job_id,
        status: ApplicationStatus::Applied,
        applied_at: now,
        created_at: now,
        updated_at: now,
    };

    // 5. Insert; the unique (studentId, jobId) index settles races
    match applications.insert_one(&application).await {
        Ok(inserted) => {
            application.id = inserted.inserted_id.as_object_id();
            log::info!(
                "📋 Application submitted: student {} -> job {}",
                student_id.to_hex(),
                job_id.to_hex()
            );
            Ok(application)
        }
        Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        )),
        Err(e) => Err(AppError::DatabaseError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_application(job_id: ObjectId, millis: i64) -> Application {
        Application {
            id: Some(ObjectId::new()),
            student_id: ObjectId::parse_str("665f1f77bcf86cd799439012").unwrap(),
            job_id,
            status: ApplicationStatus::Applied,
            applied_at: DateTime::from_millis(millis),
            created_at: DateTime::from_millis(millis),
            updated_at: DateTime::from_millis(millis),
        }
    }

    fn sample_job(id: ObjectId, title: &str) -> Job {
        Job {
            id: Some(id),
            title: title.to_string(),
            company_name: "Acme".to_string(),
            company_id: ObjectId::new(),
            mode: "onsite".to_string(),
            description: None,
            location: None,
            salary: None,
            deadline: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_join_keeps_order_and_embeds_jobs() {
        let job_a = ObjectId::new();
        let job_b = ObjectId::new();

        let applications = vec![
            sample_application(job_a, 1_000),
            sample_application(job_b, 2_000),
        ];

        let mut jobs = HashMap::new();
        jobs.insert(job_a, sample_job(job_a, "Backend Intern"));
        jobs.insert(job_b, sample_job(job_b, "Data Analyst"));

        let joined = join_applications(applications, &jobs);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].job_id.as_ref().unwrap().title, "Backend Intern");
        assert_eq!(joined[1].job_id.as_ref().unwrap().title, "Data Analyst");
    }

    #[test]
    fn test_join_dangling_job_becomes_none() {
        let known = ObjectId::new();
        let dangling = ObjectId::new();

        let applications = vec![
            sample_application(known, 1_000),
            sample_application(dangling, 2_000),
        ];

        let mut jobs = HashMap::new();
        jobs.insert(known, sample_job(known, "Backend Intern"));

        let joined = join_applications(applications, &jobs);
        assert!(joined[0].job_id.is_some());
        assert!(joined[1].job_id.is_none());
        // the entry itself survives with its own fields intact
        assert_eq!(joined[1].status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_join_empty_input() {
        let joined = join_applications(Vec::new(), &HashMap::new());
        assert!(joined.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_job_id() {
        let db = MongoDB::connect_lazy("mongodb://localhost:27017/placement-test")
            .await
            .unwrap();

        let err = submit_application(
            &db,
            &ObjectId::new(),
            &ApplyRequest {
                job_id: "not-an-object-id".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    #[ignore] // needs a running MongoDB instance
    async fn test_submit_and_list_flow() {
        use crate::models::CreateProfileRequest;
        use crate::services::profile_service;

        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/placement-test".to_string());
        let db = MongoDB::new(&uri).await.expect("connection failed");
        let user_id = ObjectId::new();

        // without a profile the listing succeeds and is empty
        let empty = list_applications(&db, &user_id).await.unwrap();
        assert!(!empty.profile_found);
        assert!(empty.applications.is_empty());

        profile_service::create_profile(
            &db,
            &user_id,
            &CreateProfileRequest {
                email: None,
                enrollment_no: Some("EN-77".to_string()),
                branch: Some("IT".to_string()),
                year: Some(4),
                cgpa: Some(7.9),
                resume_url: Some("https://cdn.example.com/r.pdf".to_string()),
                skills: Some(vec!["sql".to_string()]),
            },
        )
        .await
        .unwrap();

        let jobs = db.collection::<Job>("jobs");
        let job_id = ObjectId::new();
        jobs.insert_one(sample_job(job_id, "Platform Engineer"))
            .await
            .unwrap();

        let submitted = submit_application(
            &db,
            &user_id,
            &ApplyRequest {
                job_id: job_id.to_hex(),
            },
        )
        .await
        .unwrap();
        assert_eq!(submitted.status, ApplicationStatus::Applied);

        // applying twice to the same posting is rejected
        let err = submit_application(
            &db,
            &user_id,
            &ApplyRequest {
                job_id: job_id.to_hex(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let listed = list_applications(&db, &user_id).await.unwrap();
        assert!(listed.profile_found);
        assert_eq!(listed.applications.len(), 1);
        assert_eq!(
            listed.applications[0].job_id.as_ref().unwrap().title,
            "Platform Engineer"
        );
    }
}
