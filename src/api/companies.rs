use actix_web::{web, HttpResponse, ResponseError};

use crate::database::MongoDB;
use crate::models::CompanyResponse;
use crate::services::company_service;

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = "Companies",
    responses((status = 200, description = "All recruiting companies"))
)]
pub async fn list_companies(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("🏢 GET /companies");

    match company_service::list_companies(&db).await {
        Ok(companies) => {
            let companies: Vec<CompanyResponse> =
                companies.into_iter().map(CompanyResponse::from).collect();
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "companies": companies
            }))
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    params(("id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "One company"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🏢 GET /companies/{}", id);

    match company_service::get_company(&db, &id).await {
        Ok(company) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "company": CompanyResponse::from(company)
        })),
        Err(e) => e.error_response(),
    }
}
