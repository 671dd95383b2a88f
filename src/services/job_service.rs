use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::MongoDB;
use crate::models::Job;
use crate::utils::error::AppError;

const COLLECTION: &str = "jobs";

/// Lists job postings in stored order.
pub async fn list_jobs(db: &MongoDB) -> Result<Vec<Job>, AppError> {
    let collection = db.collection::<Job>(COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut jobs = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(job) => jobs.push(job),
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        }
    }

    Ok(jobs)
}

/// Fetches one posting by id.
pub async fn get_job(db: &MongoDB, id: &str) -> Result<Job, AppError> {
    let object_id = ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("Invalid job id".to_string()))?;

    let collection = db.collection::<Job>(COLLECTION);

    collection
        .find_one(doc! { "_id": object_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}
