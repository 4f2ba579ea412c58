//! Bearer-token authentication middleware.
//!
//! Extracts the token from the Authorization header, hands it to the
//! credential service registered in app data, and injects the resolved
//! user into the request extensions. Handlers receive it through the
//! `AuthUser` extractor.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use rw_core::domain::entities::user::User;
use rw_core::services::credentials::CredentialService;
use rw_shared::types::response::ApiResponse;

/// The authenticated user injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Bearer authentication middleware factory
pub struct RequireAuth;

impl RequireAuth {
    /// Creates a new authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequireAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service
pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => return Err(unauthorized("Authentication required")),
            };

            let credentials = match req
                .app_data::<web::Data<Arc<dyn CredentialService>>>()
            {
                Some(credentials) => credentials.get_ref().clone(),
                None => return Err(unauthorized("Authentication is not configured")),
            };

            let user = match credentials.authenticate(&token).await {
                Ok(user) => user,
                Err(_) => return Err(unauthorized("Invalid or expired token")),
            };

            // Inject the authenticated user into request extensions
            req.extensions_mut().insert(AuthUser(user));

            service.call(req).await
        })
    }
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Build a 401 carrying the standard response envelope
fn unauthorized(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error(message)),
    )
    .into()
}

/// Extractor for the authenticated user
impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| unauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
