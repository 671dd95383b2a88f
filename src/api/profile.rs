use actix_web::{web, HttpResponse, ResponseError};

use crate::database::MongoDB;
use crate::models::{CreateProfileRequest, StudentProfileResponse, UpdateProfileRequest};
use crate::services::profile_service;
use crate::services::session::{self, Claims};

#[utoipa::path(
    get,
    path = "/api/v1/student/profile",
    tag = "Student",
    responses(
        (status = 200, description = "Profile for the signed-in student"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Student has not created a profile yet")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(db: web::Data<MongoDB>, user: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /student/profile - user: {}", user.sub);

    let user_id = match session::subject_id(&user) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match profile_service::get_profile(&db, &user_id).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Fetched student profile",
            "student": StudentProfileResponse::from(profile)
        })),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/student/profile",
    tag = "Student",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile created"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Student profile already exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_profile(
    db: web::Data<MongoDB>,
    user: web::ReqData<Claims>,
    request: web::Json<CreateProfileRequest>,
) -> HttpResponse {
    log::info!("📝 POST /student/profile - user: {}", user.sub);

    let user_id = match session::subject_id(&user) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match profile_service::create_profile(&db, &user_id, &request).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "profile": StudentProfileResponse::from(profile)
        })),
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/student/profile",
    tag = "Student",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated with the submitted fields"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Profile not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    db: web::Data<MongoDB>,
    user: web::ReqData<Claims>,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    log::info!("🔧 PATCH /student/profile - user: {}", user.sub);

    let user_id = match session::subject_id(&user) {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    match profile_service::update_profile(&db, &user_id, &request).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "profile": StudentProfileResponse::from(profile)
        })),
        Err(e) => e.error_response(),
    }
}
