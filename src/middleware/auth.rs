use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::session;
use crate::utils::error::AppError;

/// Rejects API calls without a valid session token and parks the verified
/// claims in request extensions for handlers to pick up via `ReqData`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = super::session_token(&req)
            .as_deref()
            .map(session::verify_session_token);

        match claims {
            Some(Ok(claims)) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            _ => Box::pin(async move {
                Err(AppError::Unauthenticated("Not authenticated".to_string()).into())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{cookie::Cookie, test, web, App, HttpResponse};

    use crate::services::session::{sign_session_token, test_claims, Claims, SESSION_COOKIE};

    async fn whoami(user: web::ReqData<Claims>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "sub": user.sub }))
    }

    macro_rules! protected_app {
        () => {
            test::init_service(App::new().service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ))
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_401() {
        let app = protected_app!();

        let req = test::TestRequest::get().uri("/api/v1/whoami").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_garbage_bearer_token_is_401() {
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/api/v1/whoami")
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_expired_token_is_401() {
        let token = sign_session_token(&test_claims("665f1f77bcf86cd799439011", -300));
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/api/v1/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_bearer_token_reaches_handler_with_claims() {
        let token = sign_session_token(&test_claims("665f1f77bcf86cd799439011", 3600));
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/api/v1/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sub"], "665f1f77bcf86cd799439011");
    }

    #[actix_web::test]
    async fn test_session_cookie_also_accepted() {
        let token = sign_session_token(&test_claims("665f1f77bcf86cd799439011", 3600));
        let app = protected_app!();

        let req = test::TestRequest::get()
            .uri("/api/v1/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
