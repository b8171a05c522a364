//! Authentication gate and the identity extractor it feeds.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap},
};
use uuid::Uuid;

use quill_core::ports::{AuthClaims, AuthError, TokenService};

use super::error::AppError;

/// Identity of the caller, placed in request extensions by [`AuthGate`].
///
/// ```ignore
/// async fn protected_route(user: AuthUser) -> impl Responder {
///     format!("Hello, user {}!", user.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<AuthClaims> for AuthUser {
    fn from(claims: AuthClaims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Only present on routes wrapped by the gate
        let user = req.extensions().get::<AuthUser>().copied();

        ready(user.ok_or_else(|| AppError::Unauthorized("You are not logged in".to_string())))
    }
}

/// Extract the credential from `Authorization: Bearer <token>`.
///
/// The header must hold exactly two whitespace-separated parts; the scheme is
/// matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::InvalidToken("Expected Bearer token".to_string())),
    }
}

fn authenticate(headers: &HeaderMap, tokens: &dyn TokenService) -> Result<AuthClaims, AuthError> {
    let token = bearer_token(headers)?;
    tokens.verify(token)
}

/// Middleware factory rejecting requests without a valid bearer token.
///
/// Rejected requests get a 403 and never reach the wrapped service.
pub struct AuthGate {
    tokens: Arc<dyn TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(req.headers(), self.tokens.as_ref()) {
            Ok(claims) => {
                tracing::debug!(
                    user_id = %claims.user_id,
                    issued_at = ?claims.issued_at,
                    expires_at = claims.expires_at,
                    "Authenticated request"
                );
                req.extensions_mut().insert(AuthUser::from(claims));

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                tracing::debug!(
                    path = %req.path(),
                    reason = %err,
                    "Rejected unauthenticated request"
                );

                let response = AppError::from(err).error_response();
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;
    use quill_infra::{JwtConfig, JwtTokenService};

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer  abc")).unwrap(), "abc");
    }

    #[test]
    fn test_authenticate_returns_token_lifetime() {
        let tokens = JwtTokenService::new(JwtConfig {
            secret: "gate-secret".to_string(),
            expiration_hours: 2,
            issuer: "gate-test".to_string(),
        });
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id).unwrap();

        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let claims = authenticate(&map, &tokens).unwrap();

        assert_eq!(claims.user_id, user_id);
        let issued_at = claims.issued_at.unwrap();
        assert_eq!(claims.expires_at - issued_at, 2 * 3600);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingAuth)
        ));
    }

    #[test]
    fn test_malformed_headers_rejected() {
        for value in ["", "abc", "Bearer", "Token abc", "Bearer abc def"] {
            assert!(
                matches!(bearer_token(&headers(value)), Err(AuthError::InvalidToken(_))),
                "accepted {value:?}"
            );
        }
    }
}
