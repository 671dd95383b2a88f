use actix_web::{web, HttpResponse, ResponseError};

use crate::database::MongoDB;
use crate::models::{ApplicationResponse, ApplyRequest};
use crate::services::application_service;
use crate::services::session::{self, Claims};

#[utoipa::path(
    get,
    path = "/api/v1/applications",
    tag = "Applications",
    responses(
        (status = 200, description = "Applications with their job postings embedded"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_applications(db: web::Data<MongoDB>, user: web::ReqData<Claims>) -> HttpResponse {
    log::info!("📋 GET /applications - user: {}", user.sub);

    let user_id = match session::subject_id(&user) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match application_service::list_applications(&db, &user_id).await {
        Ok(list) if list.profile_found => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "applications": list.applications
        })),
        Ok(list) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Student profile not found",
            "applications": list.applications
        })),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    tag = "Applications",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application recorded"),
        (status = 400, description = "Invalid job id"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No profile yet, or job posting gone"),
        (status = 409, description = "Already applied to this job")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_application(
    db: web::Data<MongoDB>,
    user: web::ReqData<Claims>,
    request: web::Json<ApplyRequest>,
) -> HttpResponse {
    log::info!(
        "📋 POST /applications - user: {} job: {}",
        user.sub,
        request.job_id
    );

    let user_id = match session::subject_id(&user) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match application_service::submit_application(&db, &user_id, &request).await {
        Ok(application) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "application": ApplicationResponse::from(application)
        })),
        Err(e) => e.error_response(),
    }
}
