// HTTP middleware
pub mod auth;
pub mod route_gate;

use actix_web::dev::ServiceRequest;

use crate::services::session::SESSION_COOKIE;

/// Session token from the bearer header or the frontend's session cookie.
pub(crate) fn session_token(req: &ServiceRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}
