use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::session;

/// Where the gate sends a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Next,
    ToDashboard,
    ToSignIn,
}

/// Pure routing decision for page paths.
///
/// Signed-in visitors are bounced off the entry pages (sign-in, sign-up
/// and the landing page) to the dashboard; anonymous visitors are bounced
/// off dashboard pages to sign-in. Everything else, the API included,
/// passes through untouched.
pub fn decide(path: &str, authenticated: bool) -> GateDecision {
    if authenticated
        && (path.starts_with("/sign-in") || path.starts_with("/sign-up") || path == "/")
    {
        return GateDecision::ToDashboard;
    }

    if !authenticated && path.starts_with("/dashboard") {
        return GateDecision::ToSignIn;
    }

    GateDecision::Next
}

/// Applies the page routing policy ahead of the whole app.
///
/// A token that fails verification (expired, tampered) counts as anonymous
/// here; the response body type widens to `EitherBody` so the gate can
/// short-circuit with its own redirect.
pub struct RouteGate;

impl<S, B> Transform<S, ServiceRequest> for RouteGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGateService { service }))
    }
}

pub struct RouteGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = super::session_token(&req)
            .as_deref()
            .map(session::verify_session_token)
            .map_or(false, |claims| claims.is_ok());

        let target = match decide(req.path(), authenticated) {
            GateDecision::Next => {
                let fut = self.service.call(req);
                return Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                });
            }
            GateDecision::ToDashboard => "/dashboard",
            GateDecision::ToSignIn => "/sign-in",
        };

        log::debug!("🚪 Redirecting {} -> {}", req.path(), target);

        let (request, _) = req.into_parts();
        let response = HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, target))
            .finish()
            .map_into_right_body();

        Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{cookie::Cookie, web, App};

    use crate::services::session::{sign_session_token, test_claims, SESSION_COOKIE};

    #[test]
    fn test_decide_anonymous_paths() {
        assert_eq!(decide("/", false), GateDecision::Next);
        assert_eq!(decide("/sign-in", false), GateDecision::Next);
        assert_eq!(decide("/sign-up", false), GateDecision::Next);
        assert_eq!(decide("/dashboard", false), GateDecision::ToSignIn);
        assert_eq!(decide("/dashboard/jobs", false), GateDecision::ToSignIn);
        assert_eq!(decide("/about", false), GateDecision::Next);
        assert_eq!(decide("/api/v1/jobs", false), GateDecision::Next);
    }

    #[test]
    fn test_decide_authenticated_paths() {
        assert_eq!(decide("/", true), GateDecision::ToDashboard);
        assert_eq!(decide("/sign-in", true), GateDecision::ToDashboard);
        assert_eq!(decide("/sign-in/otp", true), GateDecision::ToDashboard);
        assert_eq!(decide("/sign-up", true), GateDecision::ToDashboard);
        assert_eq!(decide("/dashboard", true), GateDecision::Next);
        assert_eq!(decide("/dashboard/profile", true), GateDecision::Next);
        assert_eq!(decide("/about", true), GateDecision::Next);
        assert_eq!(decide("/api/v1/jobs", true), GateDecision::Next);
    }

    macro_rules! gated_app {
        () => {
            actix_web::test::init_service(
                App::new()
                    .wrap(RouteGate)
                    .route("/", web::get().to(|| async { "landing" }))
                    .route("/sign-in", web::get().to(|| async { "sign in" }))
                    .route("/dashboard", web::get().to(|| async { "dashboard" })),
            )
            .await
        };
    }

    fn session_cookie(ttl_seconds: i64) -> Cookie<'static> {
        let token = sign_session_token(&test_claims("665f1f77bcf86cd799439011", ttl_seconds));
        Cookie::new(SESSION_COOKIE, token)
    }

    #[actix_web::test]
    async fn test_anonymous_dashboard_redirects_to_sign_in() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get().uri("/dashboard").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/sign-in");
    }

    #[actix_web::test]
    async fn test_signed_in_entry_page_redirects_to_dashboard() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get()
            .uri("/sign-in")
            .cookie(session_cookie(3600))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
    }

    #[actix_web::test]
    async fn test_signed_in_landing_redirects_to_dashboard() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get()
            .uri("/")
            .cookie(session_cookie(3600))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
    }

    #[actix_web::test]
    async fn test_anonymous_landing_passes_through() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get().uri("/").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_signed_in_dashboard_passes_through() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie(3600))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_expired_session_counts_as_anonymous() {
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie(-300))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/sign-in");
    }

    #[actix_web::test]
    async fn test_bearer_header_counts_as_signed_in() {
        let token = sign_session_token(&test_claims("665f1f77bcf86cd799439011", 3600));
        let app = gated_app!();

        let req = actix_web::test::TestRequest::get()
            .uri("/sign-in")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");
    }
}
