mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");
    let frontend_url = env::var("FRONTEND_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    log::info!("🚀 Starting Placement Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // Outgoing mail (Resend HTTP API)
    let mailer = web::Data::new(services::mail_service::ResendMailer::from_env());

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url) // Frontend Web (Next.js)
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CACHE_CONTROL,
                actix_web::http::header::PRAGMA,
            ])
            .expose_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(mailer.clone())
            .wrap(cors)
            .wrap(middleware::route_gate::RouteGate)
            .wrap(Logger::default())
            .wrap(Logger::new("%a %{User-Agent}i"))
            // Swagger UI with authentication
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints: password recovery (no session required)
            .service(
                web::scope("/api/v1/auth")
                    .route("/forgot-password", web::post().to(api::auth::forgot_password))
                    .route("/resend-otp", web::post().to(api::auth::resend_otp))
                    .route("/reset-password", web::post().to(api::auth::reset_password))
            )

            // ==================== STUDENT DATA (session required) ====================

            // Student profile: one per account (CRUD minus delete)
            .service(
                web::scope("/api/v1/student")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("/profile", web::get().to(api::profile::get_profile))
                    .route("/profile", web::post().to(api::profile::create_profile))
                    .route("/profile", web::patch().to(api::profile::update_profile))
            )

            // Applications: the caller's job applications
            .service(
                web::scope("/api/v1/applications")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::get().to(api::applications::list_applications))
                    .route("", web::post().to(api::applications::submit_application))
            )

            // ==================== CATALOG DATA (MongoDB) ====================

            // Jobs: posting catalog (READ ONLY)
            .service(
                web::scope("/api/v1/jobs")
                    .route("", web::get().to(api::jobs::list_jobs))
                    .route("/{id}", web::get().to(api::jobs::get_job))
            )

            // Companies: recruiter catalog (READ ONLY)
            .service(
                web::scope("/api/v1/companies")
                    .route("", web::get().to(api::companies::list_companies))
                    .route("/{id}", web::get().to(api::companies::get_company))
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
