use actix_web::{web, HttpResponse, ResponseError};

use crate::database::MongoDB;
use crate::models::JobResponse;
use crate::services::job_service;

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "Jobs",
    responses((status = 200, description = "All job postings"))
)]
pub async fn list_jobs(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("💼 GET /jobs");

    match job_service::list_jobs(&db).await {
        Ok(jobs) => {
            let jobs: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "jobs": jobs
            }))
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "Jobs",
    params(("id" = String, Path, description = "Job posting id")),
    responses(
        (status = 200, description = "One job posting"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn get_job(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("💼 GET /jobs/{}", id);

    match job_service::get_job(&db, &id).await {
        Ok(job) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "job": JobResponse::from(job)
        })),
        Err(e) => e.error_response(),
    }
}
