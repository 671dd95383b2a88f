use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Placement Service API - Core System",
        version = "1.0.0",
        description = "Complete API documentation for the Placement Service. \n\n**Authentication:** Student endpoints require the session token issued at sign-in, as a Bearer token or session cookie.\n\n**Features:**\n- Password recovery with one-time codes sent by email\n- Student profile management\n- Job and company catalog\n- Job applications with embedded postings\n- Health monitoring",
        contact(
            name = "Placement Cell Team",
            email = "support@placement-service.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::forgot_password,
        crate::api::auth::resend_otp,
        crate::api::auth::reset_password,

        // Health
        crate::api::health::health_check,

        // Student profile
        crate::api::profile::get_profile,
        crate::api::profile::create_profile,
        crate::api::profile::update_profile,

        // Applications
        crate::api::applications::list_applications,
        crate::api::applications::submit_application,

        // Jobs & Companies
        crate::api::jobs::list_jobs,
        crate::api::jobs::get_job,
        crate::api::companies::list_companies,
        crate::api::companies::get_company,
    ),
    components(
        schemas(
            // Auth
            crate::models::ForgotPasswordRequest,
            crate::models::ResetPasswordRequest,

            // Health
            crate::api::health::HealthResponse,

            // Student profile
            crate::models::CreateProfileRequest,
            crate::models::UpdateProfileRequest,
            crate::models::StudentProfileResponse,

            // Applications
            crate::models::ApplyRequest,
            crate::models::ApplicationResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Password recovery endpoints. Issue, resend, and consume one-time reset codes."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Student", description = "Student profile endpoints. Each account owns at most one profile."),
        (name = "Applications", description = "Job application endpoints. List the caller's applications and apply to postings."),
        (name = "Jobs", description = "Job posting catalog endpoints."),
        (name = "Companies", description = "Recruiting company catalog endpoints."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your session token"))
                        .build()
                ),
            );
        }
    }
}
